//! Fixed-step pacing and the game loop thread.
//!
//! `FrameClock` turns variable frame times into whole simulation ticks plus
//! an interpolation fraction. The optional loop thread owns the engine
//! outright: commands arrive over `mpsc`, and each snapshot is published to
//! shared state after its tick completes.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use barrage_core::constants::TICK_RATE;
use barrage_core::state::GameStateSnapshot;
use barrage_sim::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Duration of one simulation tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Longest frame the clock will catch up on. Anything beyond is dropped.
const MAX_FRAME: Duration = Duration::from_millis(250);

/// Lag accumulator for a fixed-timestep loop.
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick: Duration,
    lag: Duration,
}

impl FrameClock {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            lag: Duration::ZERO,
        }
    }

    /// Add a frame's elapsed time and return how many whole ticks to run.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        self.lag += frame.min(MAX_FRAME);
        let mut ticks = 0;
        while self.lag >= self.tick {
            self.lag -= self.tick;
            ticks += 1;
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator.
    pub fn alpha(&self) -> f64 {
        self.lag.as_secs_f64() / self.tick.as_secs_f64()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TICK_DURATION)
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("barrage-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick();

        // 3. Publish only after the tick is complete
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::commands::PlayerCommand;
    use barrage_core::enums::GamePhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::AssetsLoaded))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::AssetsLoaded)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartGame)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 100Hz = 10ms per tick
        assert_eq!(TICK_DURATION, Duration::from_millis(10));
    }

    #[test]
    fn test_frame_clock_accumulates_lag() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(Duration::from_millis(25)), 2);
        assert!((clock.alpha() - 0.5).abs() < 1e-9);
        assert_eq!(clock.advance(Duration::from_millis(5)), 1);
        assert!(clock.alpha().abs() < 1e-9);
        assert_eq!(clock.advance(Duration::from_millis(4)), 0);
    }

    #[test]
    fn test_frame_clock_caps_long_frames() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(Duration::from_secs(5)), 25);
    }

    #[test]
    fn test_loop_thread_publishes_snapshots() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest.clone()).unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::AssetsLoaded))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut playing = false;
        while Instant::now() < deadline {
            let phase = latest.lock().unwrap().as_ref().map(|s| s.phase);
            if phase == Some(GamePhase::Playing) {
                playing = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
        assert!(playing, "Loop never reached Playing");
    }
}
