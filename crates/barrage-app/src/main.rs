use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use barrage_app::assets::ManifestAssets;
use barrage_app::platform::{FixedSurface, ScriptedInput, TraceRenderer};
use barrage_app::runner::{self, Host, RunOptions};
use barrage_core::config::Tuning;
use barrage_core::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use barrage_sim::SimConfig;

#[derive(Parser, Debug)]
#[command(name = "barrage")]
#[command(about = "Headless missile-defence arcade simulation with a scripted autopilot")]
struct Cli {
    /// Seconds to run
    #[arg(long, default_value_t = 30.0)]
    seconds: f64,
    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: f64,
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: f64,
    /// JSON file overriding gameplay tuning values
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Directory to resolve asset files against
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// High score carried over from an earlier session
    #[arg(long, default_value_t = 0)]
    high_score: u64,
    /// Run the simulation on its own thread in real time
    #[arg(long)]
    threaded: bool,
    /// Frames between renderer log lines
    #[arg(long, default_value_t = 60)]
    log_every: u64,
    /// Autopilot click period in frames
    #[arg(long, default_value_t = 20)]
    click_every: u64,
}

fn load_tuning(path: &Path) -> Result<Tuning> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid tuning file: {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let tuning = match &cli.tuning {
        Some(path) => load_tuning(path)?,
        None => Tuning::default(),
    };
    let config = SimConfig {
        seed: cli.seed,
        width: cli.width,
        height: cli.height,
        high_score: cli.high_score,
        tuning,
    };
    tracing::debug!(config = %serde_json::to_string(&config)?, "Simulation config");

    let mut assets = ManifestAssets::new(cli.data_dir.clone());
    let mut renderer = TraceRenderer::new(cli.log_every);
    let mut input = ScriptedInput::new(cli.click_every);
    let surface = FixedSurface {
        width: cli.width,
        height: cli.height,
    };
    let mut host = Host {
        assets: &mut assets,
        renderer: &mut renderer,
        input: &mut input,
        surface: &surface,
    };
    let options = RunOptions {
        seconds: cli.seconds,
        ..Default::default()
    };

    let summary = if cli.threaded {
        runner::run_threaded(config, &mut host, &options)?
    } else {
        runner::run_headless(config, &mut host, &options)?
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
