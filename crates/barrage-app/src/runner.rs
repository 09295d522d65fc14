//! Drives the engine from the host side: loading stage, frame pacing,
//! input sampling, rendering and automatic retries.

use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;

use barrage_core::commands::PlayerCommand;
use barrage_core::enums::GamePhase;
use barrage_core::state::GameStateSnapshot;
use barrage_sim::{SimConfig, SimulationEngine};

use crate::assets::{self, AssetProvider};
use crate::game_loop::FrameClock;
use crate::platform::{DisplaySurface, InputSource, Renderer};
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Simulated (or wall-clock, when threaded) seconds to run.
    pub seconds: f64,
    /// Host frame duration.
    pub frame: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seconds: 30.0,
            frame: Duration::from_micros(16_667),
        }
    }
}

/// What happened during a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub ticks: u64,
    pub games_played: u32,
    pub best_level: u32,
    pub final_phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
}

impl RunSummary {
    fn observe(&mut self, snapshot: &GameStateSnapshot) {
        self.best_level = self.best_level.max(snapshot.level);
        self.final_phase = snapshot.phase;
        self.score = snapshot.score.score;
        self.high_score = snapshot.score.high_score;
    }
}

/// The host platform pieces a run needs.
pub struct Host<'a> {
    pub assets: &'a mut dyn AssetProvider,
    pub renderer: &'a mut dyn Renderer,
    pub input: &'a mut dyn InputSource,
    pub surface: &'a dyn DisplaySurface,
}

fn boot_commands(host: &mut Host) -> Result<Vec<PlayerCommand>> {
    let (width, height) = host.surface.size();
    assets::load_all(host.assets)?;
    Ok(vec![
        PlayerCommand::Resize { width, height },
        PlayerCommand::AssetsLoaded,
        PlayerCommand::StartGame,
    ])
}

/// Run the engine on this thread with simulated frame times. Deterministic
/// for a given seed and input source.
pub fn run_headless(config: SimConfig, host: &mut Host, options: &RunOptions) -> Result<RunSummary> {
    let mut engine = SimulationEngine::new(config);
    engine.queue_commands(boot_commands(host)?);

    let mut clock = FrameClock::default();
    let mut summary = RunSummary::default();
    let mut snapshot = engine.tick();
    summary.ticks += 1;
    summary.games_played = 1;

    let total_frames = (options.seconds / options.frame.as_secs_f64()).ceil() as u64;
    for _ in 0..total_frames {
        for _ in 0..clock.advance(options.frame) {
            engine.queue_command(host.input.sample(&snapshot).into_command());
            if snapshot.phase == GamePhase::GameOver {
                engine.queue_command(PlayerCommand::StartGame);
                summary.games_played += 1;
            }
            snapshot = engine.tick();
            summary.ticks += 1;
            summary.observe(&snapshot);
        }
        host.renderer.render(&snapshot, clock.alpha());
        summary.frames += 1;
    }

    tracing::info!(
        ticks = summary.ticks,
        games = summary.games_played,
        score = summary.score,
        "Headless run finished"
    );
    Ok(summary)
}

/// Run the engine on the game loop thread, polling snapshots in real time.
pub fn run_threaded(config: SimConfig, host: &mut Host, options: &RunOptions) -> Result<RunSummary> {
    let boot = boot_commands(host)?;
    let state = AppState::new();
    state.start(config)?;
    for command in boot {
        state.send(command)?;
    }

    let mut clock = FrameClock::default();
    let mut summary = RunSummary {
        games_played: 1,
        ..Default::default()
    };
    let deadline = Instant::now() + Duration::from_secs_f64(options.seconds.max(0.0));
    let mut last_frame = Instant::now();
    let mut last_tick = 0;

    while Instant::now() < deadline {
        std::thread::sleep(options.frame);
        let now = Instant::now();
        clock.advance(now - last_frame);
        last_frame = now;

        let Some(snapshot) = state.latest() else {
            continue;
        };
        if snapshot.time.tick == last_tick && snapshot.phase == GamePhase::Playing {
            continue;
        }
        last_tick = snapshot.time.tick;

        state.send(host.input.sample(&snapshot).into_command())?;
        if snapshot.phase == GamePhase::GameOver {
            state.send(PlayerCommand::StartGame)?;
            summary.games_played += 1;
        }
        summary.ticks = snapshot.time.tick;
        summary.observe(&snapshot);
        host.renderer.render(&snapshot, clock.alpha());
        summary.frames += 1;
    }

    state.stop();
    tracing::info!(frames = summary.frames, "Threaded run finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ManifestAssets;
    use crate::platform::{FixedSurface, ScriptedInput, TraceRenderer};

    fn run(seed: u64, seconds: f64) -> (RunSummary, u64) {
        let mut assets = ManifestAssets::new(None);
        let mut renderer = TraceRenderer::new(60);
        let mut input = ScriptedInput::new(20);
        let surface = FixedSurface {
            width: 800.0,
            height: 600.0,
        };
        let mut host = Host {
            assets: &mut assets,
            renderer: &mut renderer,
            input: &mut input,
            surface: &surface,
        };
        let summary = run_headless(
            SimConfig {
                seed,
                ..Default::default()
            },
            &mut host,
            &RunOptions {
                seconds,
                ..Default::default()
            },
        )
        .unwrap();
        (summary, renderer.frames())
    }

    #[test]
    fn test_headless_run_is_deterministic() {
        let (a, _) = run(7, 20.0);
        let (b, _) = run(7, 20.0);
        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.high_score, b.high_score);
        assert_eq!(a.final_phase, b.final_phase);
    }

    #[test]
    fn test_headless_run_paces_ticks() {
        let (summary, frames) = run(1, 2.0);
        assert_eq!(summary.frames, frames);
        // 2 s at 100 Hz, plus the boot tick, give or take a partial frame.
        assert!(
            (199..=203).contains(&summary.ticks),
            "ticks = {}",
            summary.ticks
        );
        assert_eq!(summary.best_level, 1);
        assert_eq!(summary.final_phase, GamePhase::Playing);
    }

    #[test]
    fn test_missing_assets_abort_boot() {
        let mut assets =
            ManifestAssets::new(Some(std::env::temp_dir().join("barrage-no-such-data")));
        let mut renderer = TraceRenderer::new(60);
        let mut input = ScriptedInput::new(20);
        let surface = FixedSurface {
            width: 800.0,
            height: 600.0,
        };
        let mut host = Host {
            assets: &mut assets,
            renderer: &mut renderer,
            input: &mut input,
            surface: &surface,
        };
        let result = run_headless(SimConfig::default(), &mut host, &RunOptions::default());
        assert!(result.is_err());
        assert_eq!(renderer.frames(), 0);
    }
}
