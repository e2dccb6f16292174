//! Tunable simulation parameters.

use serde::{Deserialize, Serialize};

use crate::{
    SimulationError, TileMetrics, ENEMY_CAPACITY, HORIZONTAL_MOVE_MULTIPLIER,
    SPAWN_INTERVAL_TICKS,
};

/// Dimensions of the pixel buffer the renderer draws into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 640,
            height: 384,
        }
    }
}

/// Configuration parameters required to construct a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Ticks between two spawner firings.
    pub spawn_interval_ticks: u64,
    /// Fixed number of enemy slots.
    pub enemy_capacity: usize,
    /// Pixel footprint of a tile.
    pub tile_metrics: TileMetrics,
    /// Factor applied to accepted horizontal enemy moves.
    pub horizontal_multiplier: i32,
    /// Size of the rendered frame.
    pub viewport: Viewport,
}

impl GameConfig {
    /// Rejects values that would make the simulation ill-defined.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.spawn_interval_ticks == 0 {
            return Err(SimulationError::configuration(
                "spawn_interval_ticks must be positive",
            ));
        }
        if self.enemy_capacity == 0 {
            return Err(SimulationError::configuration(
                "enemy_capacity must be positive",
            ));
        }
        if self.tile_metrics.width_px() == 0 || self.tile_metrics.height_px() == 0 {
            return Err(SimulationError::configuration(
                "tile_metrics dimensions must be positive",
            ));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(SimulationError::configuration(
                "viewport dimensions must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            enemy_capacity: ENEMY_CAPACITY,
            tile_metrics: TileMetrics::default(),
            horizontal_multiplier: HORIZONTAL_MOVE_MULTIPLIER,
            viewport: Viewport::default(),
        }
    }
}
