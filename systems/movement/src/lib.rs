#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that turns directional input into camera and enemy moves.

use tile_defence_core::{Command, EnemyView, InputSnapshot, TileGridView};
use tile_defence_system_collision::{AxisMove, CollisionResolver};
use tracing::debug;

/// Pure system that reacts to the input snapshot and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement {
    resolver: CollisionResolver,
}

impl Movement {
    /// Creates a movement system backed by the provided collision resolver.
    #[must_use]
    pub const fn new(resolver: CollisionResolver) -> Self {
        Self { resolver }
    }

    /// Emits one camera move and one move per unblocked enemy.
    ///
    /// The camera always follows the input. Every enemy attempts the same
    /// offset from its own position, so some may pass while others are
    /// blocked. Nothing is emitted when the input cancels out.
    pub fn handle(
        &mut self,
        input: InputSnapshot,
        enemies: &EnemyView,
        grid: TileGridView<'_>,
        out: &mut Vec<Command>,
    ) {
        let (dx, dy) = input.offset();
        if dx == 0 && dy == 0 {
            return;
        }

        out.push(Command::MoveCamera { dx, dy });

        for enemy in enemies.iter() {
            let resolved = self.resolver.resolve_move(&grid, enemy.position, dx, dy);
            for step in [&resolved.horizontal, &resolved.vertical] {
                match step {
                    AxisMove::Allowed { .. } => {}
                    AxisMove::Blocked { tile } => debug!(
                        enemy = enemy.id.get(),
                        column = tile.column(),
                        row = tile.row(),
                        "solid_tile"
                    ),
                    AxisMove::OutOfRange { reason } => {
                        debug!(enemy = enemy.id.get(), error = %reason, "move_out_of_range")
                    }
                }
            }

            let (allowed_dx, allowed_dy) = resolved.delta();
            if allowed_dx == 0 && allowed_dy == 0 {
                continue;
            }
            out.push(Command::MoveEnemy {
                enemy: enemy.id,
                dx: allowed_dx,
                dy: allowed_dy,
            });
        }
    }
}
