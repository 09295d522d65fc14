//! Pose bookkeeping and kinematic integration.
//!
//! `begin_tick` runs before any entity acts: it records the start-of-tick
//! position for render interpolation and recomputes every collision box
//! from the current pose, so all collision tests in the tick see fresh
//! shapes.

use hecs::World;

use barrage_core::components::{Bounds, Footprint, Transform};
use barrage_core::types::{Aabb, Position, Velocity};

/// Record previous poses and refresh collision boxes.
pub fn begin_tick(world: &mut World) {
    for (_entity, transform) in world.query_mut::<&mut Transform>() {
        transform.previous = transform.position;
    }

    for (_entity, (transform, footprint, bounds)) in
        world.query_mut::<(&Transform, &Footprint, &mut Bounds)>()
    {
        bounds.0 = Aabb::around(
            transform.position,
            footprint.half_width,
            footprint.half_height,
        );
    }
}

/// Position after moving at `velocity` for `dt` seconds.
pub fn integrate(position: Position, velocity: &Velocity, dt: f64) -> Position {
    Position::new(position.x + velocity.x * dt, position.y + velocity.y * dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_tick_refreshes_bounds_and_previous() {
        let mut world = World::new();
        let entity = world.spawn((
            Transform {
                position: Position::new(50.0, 20.0),
                previous: Position::new(0.0, 0.0),
                rotation: 0.0,
            },
            Footprint {
                half_width: 5.0,
                half_height: 2.0,
            },
            Bounds::default(),
        ));

        begin_tick(&mut world);

        let transform = world.get::<&Transform>(entity).unwrap();
        assert_eq!(transform.previous, Position::new(50.0, 20.0));
        let bounds = world.get::<&Bounds>(entity).unwrap();
        assert_eq!(bounds.0.min, Position::new(45.0, 18.0));
        assert_eq!(bounds.0.max, Position::new(55.0, 22.0));
    }

    #[test]
    fn integrate_moves_by_velocity() {
        let mut pos = Position::new(0.0, 10.0);
        let vel = Velocity::new(100.0, 0.0);
        for _ in 0..100 {
            pos = integrate(pos, &vel, 0.01);
        }
        assert!((pos.x - 100.0).abs() < 1e-9, "got {}", pos.x);
        assert_eq!(pos.y, 10.0);
    }
}
