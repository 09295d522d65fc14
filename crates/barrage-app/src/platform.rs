//! Seams to the host platform: rendering, pointer input and the display
//! surface. The headless build ships trace-backed and scripted versions.

use barrage_core::commands::PlayerCommand;
use barrage_core::enums::{EntityKind, GamePhase, Team};
use barrage_core::state::GameStateSnapshot;
use barrage_core::types::Position;

/// Pointer state in playfield coordinates (y up).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSample {
    pub pointer: Position,
    pub primary_down: bool,
}

impl InputSample {
    pub fn into_command(self) -> PlayerCommand {
        PlayerCommand::SampleInput {
            pointer_x: self.pointer.x,
            pointer_y: self.pointer.y,
            primary_down: self.primary_down,
        }
    }
}

pub trait Renderer {
    /// Draw one frame. `alpha` is the fraction of a tick to interpolate by.
    fn render(&mut self, snapshot: &GameStateSnapshot, alpha: f64);
}

pub trait InputSource {
    /// Sample the pointer, given the most recent snapshot.
    fn sample(&mut self, snapshot: &GameStateSnapshot) -> InputSample;
}

pub trait DisplaySurface {
    fn size(&self) -> (f64, f64);
}

/// A surface with a fixed size.
#[derive(Debug, Clone, Copy)]
pub struct FixedSurface {
    pub width: f64,
    pub height: f64,
}

impl DisplaySurface for FixedSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

/// Renderer that reports frames through `tracing`.
#[derive(Debug)]
pub struct TraceRenderer {
    frames: u64,
    /// Log a summary every this many frames.
    every: u64,
}

impl TraceRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            frames: 0,
            every: every.max(1),
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for TraceRenderer {
    fn render(&mut self, snapshot: &GameStateSnapshot, alpha: f64) {
        self.frames += 1;
        for event in &snapshot.audio_events {
            if let Some(sound) = event.sound_key() {
                tracing::trace!(sound, "Play");
            }
        }
        if self.frames % self.every != 0 {
            return;
        }

        for item in &snapshot.draw_list {
            let at = item.interpolated(alpha);
            tracing::trace!(id = item.id, visual = %item.visual, x = at.x, y = at.y, "Draw");
        }
        tracing::debug!(
            frame = self.frames,
            tick = snapshot.time.tick,
            phase = ?snapshot.phase,
            level = snapshot.level,
            score = snapshot.score.score,
            cities = snapshot.cities_remaining,
            enemies = snapshot.enemies_live,
            drawn = snapshot.draw_list.len(),
            "Frame"
        );
    }
}

/// Headless autopilot: aims at the lowest enemy missile and clicks on a
/// fixed period.
#[derive(Debug)]
pub struct ScriptedInput {
    period_frames: u64,
    frame: u64,
    last: InputSample,
}

impl ScriptedInput {
    pub fn new(period_frames: u64) -> Self {
        Self {
            period_frames: period_frames.max(2),
            frame: 0,
            last: InputSample::default(),
        }
    }

    fn lowest_enemy_missile(snapshot: &GameStateSnapshot) -> Option<Position> {
        snapshot
            .draw_list
            .iter()
            .filter(|item| item.kind == EntityKind::Missile && item.team == Some(Team::Enemy))
            .map(|item| item.position)
            .min_by(|a, b| a.y.total_cmp(&b.y))
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self, snapshot: &GameStateSnapshot) -> InputSample {
        self.frame += 1;
        if snapshot.phase != GamePhase::Playing {
            self.last.primary_down = false;
            return self.last;
        }

        if let Some(target) = Self::lowest_enemy_missile(snapshot) {
            self.last.pointer = target;
        }
        self.last.primary_down =
            self.frame % self.period_frames == 0 && Self::lowest_enemy_missile(snapshot).is_some();
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::state::DrawItem;

    fn missile_at(y: f64, team: Team) -> DrawItem {
        DrawItem {
            id: 1,
            kind: EntityKind::Missile,
            team: Some(team),
            visual: "spine/line".into(),
            sprite: None,
            position: Position::new(100.0, y),
            previous: Position::new(100.0, y),
            rotation: 270.0,
            depth: 100,
            trail_origin: None,
        }
    }

    #[test]
    fn test_autopilot_targets_lowest_enemy_missile() {
        let snapshot = GameStateSnapshot {
            phase: GamePhase::Playing,
            draw_list: vec![
                missile_at(400.0, Team::Enemy),
                missile_at(200.0, Team::Enemy),
                missile_at(150.0, Team::Player),
            ],
            ..Default::default()
        };
        let mut input = ScriptedInput::new(2);
        let first = input.sample(&snapshot);
        assert_eq!(first.pointer.y, 200.0);
        assert!(!first.primary_down);
        let second = input.sample(&snapshot);
        assert!(second.primary_down);
    }

    #[test]
    fn test_autopilot_idle_outside_play() {
        let snapshot = GameStateSnapshot::default();
        let mut input = ScriptedInput::new(2);
        for _ in 0..4 {
            assert!(!input.sample(&snapshot).primary_down);
        }
    }

    #[test]
    fn test_input_sample_command() {
        let sample = InputSample {
            pointer: Position::new(3.0, 4.0),
            primary_down: true,
        };
        assert_eq!(
            sample.into_command(),
            PlayerCommand::SampleInput {
                pointer_x: 3.0,
                pointer_y: 4.0,
                primary_down: true,
            }
        );
    }
}
