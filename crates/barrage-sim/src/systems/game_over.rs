//! Deferred game-over transition.

use hecs::Entity;

use barrage_core::components::GameOverTimer;

use crate::context::TickContext;

/// Count down; once the delay is spent, dispose and raise the game-over
/// signal.
pub fn act(ctx: &mut TickContext, entity: Entity) {
    let expired = match ctx.entities.world().get::<&mut GameOverTimer>(entity) {
        Ok(mut timer) => {
            timer.remaining_secs -= ctx.dt;
            timer.remaining_secs < 0.0
        }
        Err(_) => return,
    };

    if expired {
        ctx.entities.dispose(entity);
        ctx.signals.game_over = true;
    }
}
