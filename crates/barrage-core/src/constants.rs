//! Simulation constants and tuning defaults.

/// Simulation tick rate (Hz). One tick every 10 ms.
pub const TICK_RATE: u32 = 100;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Tolerance for position equality (arrival tests).
pub const EPSILON: f64 = 1e-6;

// --- Playfield ---

/// Default playfield width in units.
pub const DEFAULT_WIDTH: f64 = 800.0;

/// Default playfield height in units.
pub const DEFAULT_HEIGHT: f64 = 600.0;

/// Number of structures on the defensive row (cities and turrets alternate).
pub const STRUCTURE_COUNT: usize = 7;

/// Horizontal margin between the playfield edge and the outermost structure.
pub const STRUCTURE_BORDER: f64 = 40.0;

/// Height of the defensive row.
pub const STRUCTURE_Y: f64 = 110.0;

// --- Difficulty ---

/// Difficulty of the first level.
pub const BASE_DIFFICULTY: f64 = 1.0;

/// Difficulty added per completed level.
pub const DIFFICULTY_INCREMENT: f64 = 0.1;

// --- Wave scheduler ---

/// Length of a level's spawning window (seconds).
pub const LEVEL_DURATION_SECS: f64 = 20.0;

/// Enemy missiles per level at difficulty 1.0.
pub const MISSILES_PER_LEVEL: f64 = 15.0;

/// Planes per level at difficulty 1.0.
pub const PLANES_PER_LEVEL: f64 = 3.0;

/// Enemy missile speed at difficulty 1.0 (units/s).
pub const ENEMY_MISSILE_SPEED: f64 = 60.0;

/// Turret ammo refill per level at difficulty 1.0.
pub const TURRET_AMMO_PER_LEVEL: f64 = 10.0;

// --- Plane ---

/// Plane horizontal speed (units/s).
pub const PLANE_SPEED: f64 = 100.0;

/// Seconds between plane missile launches.
pub const PLANE_MISSILE_INTERVAL_SECS: f64 = 3.0;

/// Planes enter this far below the top edge.
pub const PLANE_ALTITUDE_OFFSET: f64 = 75.0;

// --- Turret ---

/// Player missile speed (units/s).
pub const PLAYER_MISSILE_SPEED: f64 = 700.0;

/// Height of the turret barrel pivot above the turret origin.
pub const TURRET_PIVOT_HEIGHT: f64 = 12.0;

/// Distance from the barrel pivot to the muzzle.
pub const TURRET_MUZZLE_LENGTH: f64 = 20.0;

/// The barrel only follows the pointer while its angle is within this range (degrees).
pub const TURRET_AIM_MIN_DEG: f64 = 5.0;
pub const TURRET_AIM_MAX_DEG: f64 = 175.0;

/// Barrel angle before the pointer has ever been in range (degrees, straight up).
pub const TURRET_DEFAULT_AIM_DEG: f64 = 90.0;

// --- Explosion & scoring ---

/// Explosion lifetime (seconds).
pub const EXPLOSION_LIFETIME_SECS: f64 = 1.0;

/// Base score for an enemy missile kill.
pub const MISSILE_SCORE: u64 = 10;

/// Base score for a plane kill.
pub const PLANE_SCORE: u64 = 30;

/// Delay between losing the last structure and game over (seconds).
pub const GAME_OVER_DELAY_SECS: f64 = 2.0;

// --- Collision footprints (half extents) ---

pub const CITY_HALF_EXTENTS: (f64, f64) = (30.0, 15.0);
pub const TURRET_HALF_EXTENTS: (f64, f64) = (20.0, 15.0);
pub const MISSILE_HALF_EXTENTS: (f64, f64) = (6.0, 6.0);
pub const PLANE_HALF_EXTENTS: (f64, f64) = (30.0, 10.0);
pub const EXPLOSION_HALF_EXTENTS: (f64, f64) = (40.0, 40.0);

// --- Draw order ---

pub const DEPTH_STRUCTURE: i32 = 0;
pub const DEPTH_PLANE: i32 = 0;
pub const DEPTH_MISSILE: i32 = 100;
pub const DEPTH_EXPLOSION: i32 = 150;

// --- Asset keys ---

pub const VISUAL_CITY: &str = "spine/city";
pub const VISUAL_TURRET: &str = "spine/base";
pub const VISUAL_MISSILE: &str = "spine/line";
pub const VISUAL_PLANE: &str = "spine/plane";
pub const VISUAL_EXPLOSION: &str = "spine/explosion";

/// Sprites a missile head may be drawn with, picked at random per missile.
pub const PRODUCE_SPRITES: [&str; 6] = [
    "vegetables/carrot",
    "vegetables/tomato",
    "vegetables/eggplant",
    "vegetables/broccoli",
    "vegetables/onion",
    "vegetables/pepper",
];

pub const SOUND_MISSILE: &str = "sfx/missile.wav";
pub const SOUND_EXPLOSION: &str = "sfx/explosion.wav";
pub const SOUND_CITY: &str = "sfx/city.wav";
