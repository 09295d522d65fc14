//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the entity manager, processes player commands,
//! runs one fixed step per `tick`, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use barrage_core::commands::PlayerCommand;
use barrage_core::components::TurretState;
use barrage_core::config::Tuning;
use barrage_core::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH, DT};
use barrage_core::enums::{EntityKind, GamePhase};
use barrage_core::events::AudioEvent;
use barrage_core::state::GameStateSnapshot;
use barrage_core::types::{Position, SimTime};

use crate::context::{Playfield, Rosters, TickContext, TickSignals};
use crate::entity_manager::EntityManager;
use crate::score::{HighScore, ScoreState};
use crate::systems;
use crate::systems::fire_control::FireControl;
use crate::systems::snapshot::SnapshotInput;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial playfield size.
    pub width: f64,
    pub height: f64,
    /// High score carried in from a previous process, if any.
    pub high_score: u64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            high_score: 0,
            tuning: Tuning::default(),
        }
    }
}

/// Latest pointer sample.
#[derive(Debug, Clone, Copy, Default)]
struct InputSample {
    pointer: Position,
    primary_down: bool,
}

/// The simulation engine. Owns every entity and all game state.
pub struct SimulationEngine {
    entities: EntityManager,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    tuning: Tuning,
    playfield: Playfield,
    command_queue: VecDeque<PlayerCommand>,
    audio_events: Vec<AudioEvent>,

    rosters: Rosters,
    score: ScoreState,
    final_score: Option<u64>,
    level: u32,
    difficulty: f64,
    enemy_controller: Option<Entity>,
    game_over_armed: bool,
    input: InputSample,
    fire_control: FireControl,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            entities: EntityManager::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            difficulty: config.tuning.base_difficulty,
            tuning: config.tuning,
            playfield: Playfield {
                width: config.width,
                height: config.height,
            },
            command_queue: VecDeque::new(),
            audio_events: Vec::new(),
            rosters: Rosters::default(),
            score: ScoreState::new(HighScore::new(config.high_score)),
            final_score: None,
            level: 0,
            enemy_controller: None,
            game_over_armed: false,
            input: InputSample::default(),
            fire_control: FireControl::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            self.run_systems();
            self.time.advance();
        }

        self.snapshot()
    }

    /// Build a snapshot of the current state, draining pending audio events.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.entities,
            &self.rosters,
            SnapshotInput {
                time: self.time,
                phase: self.phase,
                playfield: self.playfield,
                level: self.level,
                difficulty: self.difficulty,
                score: &self.score,
                final_score: self.final_score,
            },
            audio_events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn rosters(&self) -> &Rosters {
        &self.rosters
    }

    pub fn enemy_controller(&self) -> Option<Entity> {
        self.enemy_controller
    }

    /// Read-only access to the entity manager.
    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    /// Mutable access to entities and the RNG for scripted scenarios.
    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> (&mut EntityManager, &mut ChaCha8Rng, &Tuning) {
        (&mut self.entities, &mut self.rng, &self.tuning)
    }

    /// Enter `Playing` with an empty field and no wave scheduler.
    #[cfg(test)]
    pub(crate) fn start_sandbox(&mut self) {
        self.reset_game();
        self.phase = GamePhase::Playing;
    }

    /// Replace the rosters, for scripted scenarios.
    #[cfg(test)]
    pub(crate) fn set_rosters(&mut self, rosters: Rosters) {
        self.rosters = rosters;
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Commands that do not apply to the
    /// current phase are ignored.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::AssetsLoaded => {
                if self.phase == GamePhase::Loading {
                    self.phase = GamePhase::Menu;
                    tracing::info!("Assets loaded");
                }
            }
            PlayerCommand::Resize { width, height } => {
                if width > 0.0 && height > 0.0 {
                    self.playfield = Playfield { width, height };
                }
            }
            PlayerCommand::StartGame => {
                if matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
                    self.start_game();
                }
            }
            PlayerCommand::ReturnToMenu => {
                if self.phase == GamePhase::GameOver {
                    self.phase = GamePhase::Menu;
                }
            }
            PlayerCommand::SampleInput {
                pointer_x,
                pointer_y,
                primary_down,
            } => {
                self.input = InputSample {
                    pointer: Position::new(pointer_x, pointer_y),
                    primary_down,
                };
            }
        }
    }

    fn reset_game(&mut self) {
        self.entities.clear();
        self.rosters = Rosters::default();
        self.score.reset();
        self.final_score = None;
        self.level = 0;
        self.difficulty = self.tuning.base_difficulty;
        self.enemy_controller = None;
        self.game_over_armed = false;
        self.fire_control.reset();
        self.time = SimTime::default();
    }

    fn start_game(&mut self) {
        self.reset_game();
        self.rosters = world_setup::setup_structures(&mut self.entities, self.playfield);
        self.phase = GamePhase::Playing;
        tracing::info!(
            width = self.playfield.width,
            height = self.playfield.height,
            "Game started"
        );
        self.start_level(1, self.tuning.base_difficulty);
    }

    /// Refill turret ammo and spawn the wave scheduler for `level`.
    fn start_level(&mut self, level: u32, difficulty: f64) {
        self.level = level;
        self.difficulty = difficulty;

        let params = self.tuning.level_params(difficulty);
        for &turret in &self.rosters.turrets {
            if let Ok(mut state) = self.entities.world().get::<&mut TurretState>(turret) {
                state.ammo = params.turret_ammo;
            }
        }

        self.enemy_controller = Some(world_setup::spawn_enemy_controller(
            &mut self.entities,
            &self.tuning,
            level,
            difficulty,
        ));
        self.audio_events
            .push(AudioEvent::LevelStarted { level, difficulty });
        tracing::info!(
            level,
            difficulty,
            missiles = params.missile_count,
            planes = params.plane_count,
            missile_speed = params.missile_speed,
            "Level started"
        );
    }

    fn start_next_level(&mut self) {
        let difficulty = self.difficulty + self.tuning.difficulty_increment;
        self.start_level(self.level + 1, difficulty);
    }

    fn enter_game_over(&mut self) {
        let score = self.score.score();
        self.final_score = Some(score);
        self.phase = GamePhase::GameOver;
        self.entities.clear();
        self.rosters = Rosters::default();
        self.enemy_controller = None;
        self.game_over_armed = false;
        self.audio_events.push(AudioEvent::GameOver { score });
        tracing::info!(
            score,
            high_score = self.score.high_score(),
            level = self.level,
            "Game over"
        );
    }

    /// Borrow engine state as a tick context, alongside fire control.
    fn split<'a>(
        &'a mut self,
        signals: &'a mut TickSignals,
    ) -> (TickContext<'a>, &'a mut FireControl) {
        let ctx = TickContext {
            entities: &mut self.entities,
            rng: &mut self.rng,
            tuning: &self.tuning,
            rosters: &self.rosters,
            score: &mut self.score,
            audio_events: &mut self.audio_events,
            signals,
            playfield: self.playfield,
            pointer: self.input.pointer,
            difficulty: self.difficulty,
            enemy_controller: self.enemy_controller,
            dt: DT,
        };
        (ctx, &mut self.fire_control)
    }

    /// Run one fixed step.
    fn run_systems(&mut self) {
        let mut signals = TickSignals::default();

        // 1. Start-of-tick poses and collision boxes
        systems::movement::begin_tick(self.entities.world_mut());

        // 2. Act and end passes over the live set captured now
        let visit = self.entities.begin_tick();
        {
            let (mut ctx, _) = self.split(&mut signals);
            for &entity in &visit {
                if let Some(kind) = live_kind(ctx.entities, entity) {
                    systems::act(&mut ctx, entity, kind);
                }
            }
            for &entity in &visit {
                if let Some(kind) = live_kind(ctx.entities, entity) {
                    systems::act_end(&mut ctx, entity, kind);
                }
            }
        }

        // 3. Prune, then roster bookkeeping
        let pruned = self.entities.prune();
        let defeated =
            systems::cleanup::run(&pruned, &mut self.rosters, &mut self.audio_events);
        if defeated && !self.game_over_armed {
            world_setup::spawn_game_over_timer(&mut self.entities, &self.tuning);
            self.game_over_armed = true;
            tracing::info!(score = self.score.score(), "All structures lost");
        }

        // 4. Level and game transitions
        if signals.game_over {
            self.enter_game_over();
            return;
        }
        if signals.level_cleared {
            self.start_next_level();
        }

        // 5. Player fire control
        let primary_down = self.input.primary_down;
        let (mut ctx, control) = self.split(&mut signals);
        systems::fire_control::run(&mut ctx, control, primary_down);
    }
}

/// Kind of `entity` if it has not been disposed.
fn live_kind(entities: &EntityManager, entity: Entity) -> Option<EntityKind> {
    if entities.is_live(entity) {
        entities.kind(entity)
    } else {
        None
    }
}
