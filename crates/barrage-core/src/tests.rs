use crate::commands::PlayerCommand;
use crate::config::Tuning;
use crate::enums::*;
use crate::events::AudioEvent;
use crate::state::{DrawItem, GameStateSnapshot};
use crate::types::{Aabb, Position, SimTime, Velocity};

// ---- Serde ----

#[test]
fn test_command_tagged_json() {
    let cmd = PlayerCommand::SampleInput {
        pointer_x: 10.0,
        pointer_y: 20.0,
        primary_down: true,
    };
    let json = serde_json::to_string(&cmd).unwrap();
    assert!(json.contains("\"type\":\"SampleInput\""), "got {json}");
    let back: PlayerCommand = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cmd);

    let start: PlayerCommand = serde_json::from_str(r#"{"type":"StartGame"}"#).unwrap();
    assert_eq!(start, PlayerCommand::StartGame);
}

#[test]
fn test_audio_event_serde() {
    let events = vec![
        AudioEvent::MissileLaunched { x: 1.0, y: 2.0 },
        AudioEvent::Explosion {
            x: 3.0,
            y: 4.0,
            team: Team::Enemy,
        },
        AudioEvent::StructureLost {
            kind: EntityKind::City,
            x: 5.0,
            y: 6.0,
        },
        AudioEvent::LevelStarted {
            level: 2,
            difficulty: 1.1,
        },
        AudioEvent::GameOver { score: 120 },
    ];
    let json = serde_json::to_string(&events).unwrap();
    let back: Vec<AudioEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, events);
}

#[test]
fn test_snapshot_default_serde() {
    let snap = GameStateSnapshot::default();
    assert_eq!(snap.phase, GamePhase::Loading);
    let json = serde_json::to_string(&snap).unwrap();
    let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.phase, GamePhase::Loading);
    assert!(back.draw_list.is_empty());
}

#[test]
fn test_sound_keys() {
    assert_eq!(
        AudioEvent::MissileLaunched { x: 0.0, y: 0.0 }.sound_key(),
        Some("sfx/missile.wav")
    );
    assert_eq!(AudioEvent::GameOver { score: 0 }.sound_key(), None);
}

// ---- Geometry ----

#[test]
fn test_aabb_intersection() {
    let a = Aabb::around(Position::new(0.0, 0.0), 10.0, 10.0);
    let b = Aabb::around(Position::new(15.0, 0.0), 5.0, 5.0);
    let c = Aabb::around(Position::new(16.0, 0.0), 5.0, 5.0);
    assert!(a.intersects(&b), "touching edges should intersect");
    assert!(b.intersects(&a));
    assert!(!a.intersects(&c));
    assert!(a.contains(&Position::new(-10.0, 10.0)));
    assert!(!a.contains(&Position::new(-10.1, 0.0)));
}

#[test]
fn test_position_helpers() {
    let a = Position::new(0.0, 0.0);
    let b = Position::new(3.0, 4.0);
    assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    assert!((a.angle_to_deg(&Position::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
    assert!((a.angle_to_deg(&Position::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    assert!(b.approx_eq(&Position::new(3.0 + 1e-7, 4.0 - 1e-7)));
    assert!(!b.approx_eq(&Position::new(3.001, 4.0)));
    assert_eq!(a.lerp(&b, 0.5), Position::new(1.5, 2.0));
    assert!((Velocity::new(3.0, 4.0).speed() - 5.0).abs() < 1e-12);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..100 {
        time.advance();
    }
    assert_eq!(time.tick, 100);
    assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
}

#[test]
fn test_draw_item_interpolation() {
    let item = DrawItem {
        id: 1,
        kind: EntityKind::Plane,
        team: Some(Team::Enemy),
        visual: "spine/plane".into(),
        sprite: None,
        position: Position::new(10.0, 0.0),
        previous: Position::new(0.0, 0.0),
        rotation: 0.0,
        depth: 0,
        trail_origin: None,
    };
    assert_eq!(item.interpolated(0.25), Position::new(2.5, 0.0));
    assert_eq!(item.interpolated(2.0), Position::new(10.0, 0.0));
}

// ---- Tuning ----

#[test]
fn test_tuning_partial_json_uses_defaults() {
    let tuning: Tuning = serde_json::from_str(r#"{"plane_speed": 250.0}"#).unwrap();
    assert_eq!(tuning.plane_speed, 250.0);
    assert_eq!(tuning.missile_score, 10);
    assert_eq!(tuning.level_duration_secs, 20.0);
}

#[test]
fn test_level_params_scale_with_difficulty() {
    let tuning = Tuning::default();
    let first = tuning.level_params(1.0);
    assert_eq!(first.missile_count, 15);
    assert_eq!(first.plane_count, 3);
    assert_eq!(first.turret_ammo, 10);
    assert!((first.missile_speed - 60.0).abs() < 1e-9);

    let mut difficulty = 1.0;
    let mut prev = first;
    for _ in 0..20 {
        difficulty += tuning.difficulty_increment;
        let next = tuning.level_params(difficulty);
        assert!(next.missile_speed > prev.missile_speed);
        assert!(next.missile_count >= prev.missile_count);
        assert!(next.plane_count >= prev.plane_count);
        assert!(next.turret_ammo >= prev.turret_ammo);
        prev = next;
    }
    assert!(prev.missile_count > first.missile_count);
}

#[test]
fn test_kill_score_truncates_before_multiplier() {
    let tuning = Tuning::default();
    assert_eq!(tuning.kill_score(10, 1.0, 1), 10);
    assert_eq!(tuning.kill_score(10, 1.0, 2), 20);
    // floor(10 * 1.15) = 11, then x3
    assert_eq!(tuning.kill_score(10, 1.15, 3), 33);
    assert_eq!(tuning.kill_score(30, 1.1, 1), 33);
}

#[test]
fn test_kind_capabilities() {
    assert!(EntityKind::City.is_bounded());
    assert!(EntityKind::Missile.is_bounded());
    assert!(!EntityKind::Explosion.is_bounded());
    assert!(EntityKind::Explosion.is_drawable());
    assert!(!EntityKind::EnemyController.is_drawable());
    assert!(!EntityKind::GameOverTimer.is_drawable());
}
