#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tile Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The game loop submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! views such as [`TileGridView`] and [`EnemyView`], and respond exclusively
//! with new command batches.

mod config;

pub use config::{GameConfig, Viewport};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of ticks between two spawner firings.
pub const SPAWN_INTERVAL_TICKS: u64 = 1_000;

/// Number of enemy slots reserved when a level is initialised.
pub const ENEMY_CAPACITY: usize = 500;

/// Factor applied to horizontal enemy deltas after the destination tile was accepted.
pub const HORIZONTAL_MOVE_MULTIPLIER: i32 = 4;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by exactly one tick.
    Tick,
    /// Replaces the directional input consumed by the next movement pass.
    SetInput {
        /// Snapshot of the directional keys.
        input: InputSnapshot,
    },
    /// Lets every tower run its per-tick update.
    UpdateTowers,
    /// Requests that a spawner emit a new enemy at its position.
    SpawnEnemy {
        /// Spawner responsible for creating the enemy.
        spawner: SpawnerId,
    },
    /// Translates the camera without any collision check.
    MoveCamera {
        /// Horizontal offset in pixels.
        dx: i32,
        /// Vertical offset in pixels.
        dy: i32,
    },
    /// Translates an enemy by an offset that already passed collision resolution.
    MoveEnemy {
        /// Enemy being moved.
        enemy: EnemyId,
        /// Horizontal offset in pixels.
        dx: i32,
        /// Vertical offset in pixels.
        dy: i32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Value of the tick counter after the increment.
        tick: u64,
    },
    /// Announces that the directional input changed.
    InputChanged {
        /// Snapshot that is now active.
        input: InputSnapshot,
    },
    /// Confirms that the towers ran their update step.
    TowersUpdated {
        /// Number of towers that were updated.
        count: usize,
    },
    /// Confirms that a spawner produced a new enemy.
    EnemySpawned {
        /// Identifier assigned to the new enemy.
        enemy: EnemyId,
        /// Spawner that produced the enemy.
        spawner: SpawnerId,
        /// Position the enemy occupies after spawning.
        position: PixelPosition,
    },
    /// Reports that a spawn request could not be honoured.
    SpawnRejected {
        /// Spawner whose request was rejected.
        spawner: SpawnerId,
        /// Reason the spawn failed.
        reason: SimulationError,
    },
    /// Confirms that the camera moved.
    CameraMoved {
        /// Camera position after the move.
        position: PixelPosition,
    },
    /// Confirms that an enemy moved.
    EnemyMoved {
        /// Enemy that moved.
        enemy: EnemyId,
        /// Position before the move.
        from: PixelPosition,
        /// Position after the move.
        to: PixelPosition,
    },
}

/// Failures the simulation reports instead of touching memory it does not own.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// Level data or configuration is malformed; raised while initialising.
    #[error("configuration fault: {0}")]
    ConfigurationFault(String),
    /// The enemy pool is full and cannot accept another enemy.
    #[error("enemy pool capacity of {capacity} exhausted")]
    CapacityExceeded {
        /// Fixed capacity of the pool.
        capacity: usize,
    },
    /// A lookup resolved to a tile outside the grid.
    #[error("tile ({column}, {row}) lies outside the {columns}x{rows} grid")]
    OutOfRange {
        /// Requested column.
        column: i32,
        /// Requested row.
        row: i32,
        /// Number of columns in the grid.
        columns: u32,
        /// Number of rows in the grid.
        rows: u32,
    },
}

impl SimulationError {
    /// Convenience constructor for [`SimulationError::ConfigurationFault`].
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationFault(reason.into())
    }
}

/// Snapshot of the four directional keys delivered once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Up key held.
    pub up: bool,
    /// Down key held.
    pub down: bool,
    /// Left key held.
    pub left: bool,
    /// Right key held.
    pub right: bool,
}

impl InputSnapshot {
    /// Collapses the held keys into a single unit offset.
    ///
    /// Opposing keys cancel each other out, so holding both left and right
    /// yields no horizontal movement.
    #[must_use]
    pub const fn offset(&self) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.up {
            dy -= 1;
        }
        if self.down {
            dy += 1;
        }
        if self.left {
            dx -= 1;
        }
        if self.right {
            dx += 1;
        }
        (dx, dy)
    }
}

/// Unique identifier assigned to an enemy; equal to its pool slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy spawner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpawnerId(u32);

impl SpawnerId {
    /// Creates a new spawner identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single tile expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    column: u32,
    row: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Position in world pixel space. May be negative once the camera leaves the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPosition {
    x: i32,
    y: i32,
}

impl PixelPosition {
    /// Creates a new pixel position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the position translated by the provided offset.
    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Index into the sprite sheet that selects a tile's appearance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileVisual(u16);

impl TileVisual {
    /// Creates a new visual identifier.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the visual identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Immutable cell descriptor stored in the tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    coord: TileCoord,
    solid: bool,
    visual: TileVisual,
}

impl Tile {
    /// Creates a new tile.
    #[must_use]
    pub const fn new(coord: TileCoord, solid: bool, visual: TileVisual) -> Self {
        Self {
            coord,
            solid,
            visual,
        }
    }

    /// Grid coordinate of the tile.
    #[must_use]
    pub const fn coord(&self) -> TileCoord {
        self.coord
    }

    /// Whether the tile blocks movement.
    #[must_use]
    pub const fn is_solid(&self) -> bool {
        self.solid
    }

    /// Sprite used to draw the tile.
    #[must_use]
    pub const fn visual(&self) -> TileVisual {
        self.visual
    }

    /// Returns a copy of the tile drawn with a different sprite.
    #[must_use]
    pub const fn with_visual(self, visual: TileVisual) -> Self {
        Self { visual, ..self }
    }
}

/// Reports whether the tile blocks movement.
#[must_use]
pub const fn is_solid(tile: &Tile) -> bool {
    tile.is_solid()
}

/// Pixel footprint of a single tile, shared by collision and rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileMetrics {
    width_px: u32,
    height_px: u32,
}

impl TileMetrics {
    /// Creates tile metrics from pixel dimensions.
    ///
    /// Zero dimensions are clamped to one pixel.
    #[must_use]
    pub const fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px: if width_px == 0 { 1 } else { width_px },
            height_px: if height_px == 0 { 1 } else { height_px },
        }
    }

    /// Tile width in pixels.
    #[must_use]
    pub const fn width_px(&self) -> u32 {
        self.width_px
    }

    /// Tile height in pixels.
    #[must_use]
    pub const fn height_px(&self) -> u32 {
        self.height_px
    }

    /// Column containing the horizontal pixel position, rounding to the nearest tile.
    #[must_use]
    pub const fn column_at(&self, x: i32) -> i32 {
        nearest_tile(x, self.width_px)
    }

    /// Row containing the vertical pixel position, rounding to the nearest tile.
    #[must_use]
    pub const fn row_at(&self, y: i32) -> i32 {
        nearest_tile(y, self.height_px)
    }

    /// World pixel position of the tile's upper-left corner.
    ///
    /// `None` when the position does not fit the pixel coordinate range.
    #[must_use]
    pub fn origin_of(&self, coord: TileCoord) -> Option<PixelPosition> {
        let x = i64::from(coord.column()) * i64::from(self.width_px);
        let y = i64::from(coord.row()) * i64::from(self.height_px);
        Some(PixelPosition::new(
            i32::try_from(x).ok()?,
            i32::try_from(y).ok()?,
        ))
    }
}

impl Default for TileMetrics {
    fn default() -> Self {
        Self::new(128, 32)
    }
}

// floor(pos / size + 0.5) in integer arithmetic.
const fn nearest_tile(position: i32, size: u32) -> i32 {
    let size = size as i64;
    let shifted = position as i64 + size / 2;
    shifted.div_euclid(size) as i32
}

/// Read-only view into the dense tile grid.
#[derive(Clone, Copy, Debug)]
pub struct TileGridView<'a> {
    tiles: &'a [Tile],
    columns: u32,
    rows: u32,
}

impl<'a> TileGridView<'a> {
    /// Captures a new grid view backed by the provided row-major tile slice.
    #[must_use]
    pub fn new(tiles: &'a [Tile], columns: u32, rows: u32) -> Self {
        Self {
            tiles,
            columns,
            rows,
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Returns the tile at the provided coordinates.
    ///
    /// Coordinates are signed because they usually come from pixel positions
    /// that may lie left of or above the grid.
    pub fn tile_at(&self, column: i32, row: i32) -> Result<Tile, SimulationError> {
        self.index(column, row)
            .and_then(|index| self.tiles.get(index).copied())
            .ok_or(SimulationError::OutOfRange {
                column,
                row,
                columns: self.columns,
                rows: self.rows,
            })
    }

    fn index(&self, column: i32, row: i32) -> Option<usize> {
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        if column < self.columns && row < self.rows {
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySnapshot {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Current world position.
    pub position: PixelPosition,
    /// Tile the enemy is drawn with.
    pub tile: Tile,
}

/// Read-only snapshot describing all live enemies in pool order.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in pool order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a spawner used by the spawn scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnerSnapshot {
    /// Identifier of the spawner.
    pub id: SpawnerId,
    /// World position where enemies appear.
    pub position: PixelPosition,
}
