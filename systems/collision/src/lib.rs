#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Axis-separated collision resolution against tile solidity.
//!
//! A candidate move is split into a horizontal and a vertical step. Each step
//! maps the destination pixel position onto the nearest tile and is rejected
//! when that tile is solid or lies outside the grid. Resolving the axes
//! independently lets a diagonal move into a corner slide along the open axis.

use tile_defence_core::{
    is_solid, GameConfig, PixelPosition, SimulationError, TileCoord, TileGridView, TileMetrics,
    HORIZONTAL_MOVE_MULTIPLIER,
};

/// Outcome of resolving a single axis step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AxisMove {
    /// The destination tile is open; the entity moves by the contained delta.
    Allowed {
        /// Horizontal delta to apply, already scaled.
        dx: i32,
        /// Vertical delta to apply.
        dy: i32,
    },
    /// The destination tile is solid.
    Blocked {
        /// Tile that blocked the step.
        tile: TileCoord,
    },
    /// The destination lies outside the grid and is treated as blocked.
    OutOfRange {
        /// Lookup failure reported by the grid.
        reason: SimulationError,
    },
}

impl AxisMove {
    /// Delta the entity should actually move by; zero when blocked.
    #[must_use]
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Self::Allowed { dx, dy } => (*dx, *dy),
            Self::Blocked { .. } | Self::OutOfRange { .. } => (0, 0),
        }
    }

    /// Whether the step was rejected.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        !matches!(self, Self::Allowed { .. })
    }
}

/// Combined result of a horizontal step followed by a vertical step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedMove {
    /// Outcome of the horizontal step.
    pub horizontal: AxisMove,
    /// Outcome of the vertical step, evaluated after the horizontal step applied.
    pub vertical: AxisMove,
}

impl ResolvedMove {
    /// Total delta across both axes.
    #[must_use]
    pub fn delta(&self) -> (i32, i32) {
        let (hx, hy) = self.horizontal.delta();
        let (vx, vy) = self.vertical.delta();
        (hx.saturating_add(vx), hy.saturating_add(vy))
    }
}

/// Maps candidate deltas onto allowed deltas using tile solidity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionResolver {
    metrics: TileMetrics,
    horizontal_multiplier: i32,
}

impl CollisionResolver {
    /// Creates a resolver with explicit tile metrics and horizontal scaling.
    #[must_use]
    pub const fn new(metrics: TileMetrics, horizontal_multiplier: i32) -> Self {
        Self {
            metrics,
            horizontal_multiplier,
        }
    }

    /// Creates a resolver from the session configuration.
    #[must_use]
    pub const fn from_config(config: &GameConfig) -> Self {
        Self::new(config.tile_metrics, config.horizontal_multiplier)
    }

    /// Resolves one step of a move along a single axis.
    ///
    /// The destination tile is looked up at `round((position + delta) / tile)`
    /// per axis. Accepted horizontal deltas are scaled by the configured
    /// multiplier; vertical deltas are applied unscaled.
    #[must_use]
    pub fn resolve_axis_move(
        &self,
        grid: &TileGridView<'_>,
        position: PixelPosition,
        dx: i32,
        dy: i32,
    ) -> AxisMove {
        let column = self.metrics.column_at(position.x().saturating_add(dx));
        let row = self.metrics.row_at(position.y().saturating_add(dy));
        match grid.tile_at(column, row) {
            Ok(tile) if is_solid(&tile) => AxisMove::Blocked { tile: tile.coord() },
            Ok(_) => AxisMove::Allowed {
                dx: dx.saturating_mul(self.horizontal_multiplier),
                dy,
            },
            Err(reason) => AxisMove::OutOfRange { reason },
        }
    }

    /// Resolves a full move: horizontal first, then vertical from the updated position.
    ///
    /// Axes with a zero delta are not looked up.
    #[must_use]
    pub fn resolve_move(
        &self,
        grid: &TileGridView<'_>,
        position: PixelPosition,
        dx: i32,
        dy: i32,
    ) -> ResolvedMove {
        let horizontal = if dx == 0 {
            AxisMove::Allowed { dx: 0, dy: 0 }
        } else {
            self.resolve_axis_move(grid, position, dx, 0)
        };
        let (hx, hy) = horizontal.delta();
        let after_horizontal = position.translated(hx, hy);
        let vertical = if dy == 0 {
            AxisMove::Allowed { dx: 0, dy: 0 }
        } else {
            self.resolve_axis_move(grid, after_horizontal, 0, dy)
        };
        ResolvedMove {
            horizontal,
            vertical,
        }
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(TileMetrics::default(), HORIZONTAL_MOVE_MULTIPLIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_defence_core::{Tile, TileVisual};

    fn tiles(columns: u32, rows: u32, solid: &[(u32, u32)]) -> Vec<Tile> {
        let mut tiles = Vec::new();
        for row in 0..rows {
            for column in 0..columns {
                tiles.push(Tile::new(
                    TileCoord::new(column, row),
                    solid.contains(&(column, row)),
                    TileVisual::new(0),
                ));
            }
        }
        tiles
    }

    #[test]
    fn zero_move_stays_allowed_without_lookup() {
        let tiles = tiles(1, 1, &[(0, 0)]);
        let grid = TileGridView::new(&tiles, 1, 1);
        let resolved =
            CollisionResolver::default().resolve_move(&grid, PixelPosition::default(), 0, 0);
        assert_eq!(resolved.delta(), (0, 0));
        assert!(!resolved.horizontal.is_blocked());
        assert!(!resolved.vertical.is_blocked());
    }

    #[test]
    fn custom_multiplier_scales_horizontal_only() {
        let tiles = tiles(3, 3, &[]);
        let grid = TileGridView::new(&tiles, 3, 3);
        let resolver = CollisionResolver::new(TileMetrics::new(16, 16), 2);
        let resolved = resolver.resolve_move(&grid, PixelPosition::new(16, 16), 1, 1);
        assert_eq!(resolved.delta(), (2, 1));
    }

    #[test]
    fn negative_destination_is_out_of_range() {
        let tiles = tiles(2, 2, &[]);
        let grid = TileGridView::new(&tiles, 2, 2);
        let step = CollisionResolver::default().resolve_axis_move(
            &grid,
            PixelPosition::new(0, 0),
            0,
            -17,
        );
        assert!(matches!(step, AxisMove::OutOfRange { .. }));
        assert_eq!(step.delta(), (0, 0));
    }
}
