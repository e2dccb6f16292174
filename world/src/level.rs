//! Level data handed to the world by a loader.

use tile_defence_core::{SimulationError, Tile, TileCoord, TileVisual};

/// Tile grid plus the sparse tower and spawner tile lists produced by a level loader.
///
/// Tower and spawner lists follow the loader's layout: slots that do not hold
/// a relevant tile are `None` and are skipped when entities are created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
    tower_tiles: Vec<Option<Tile>>,
    declared_towers: usize,
    spawner_tiles: Vec<Option<Tile>>,
    declared_spawners: usize,
    enemy_visual: TileVisual,
    consumed_spawner_visual: Option<TileVisual>,
}

impl Level {
    /// Creates a level from a row-major tile list.
    ///
    /// Fails when the tile count does not match the dimensions or when a tile
    /// is stored at an index that does not match its own coordinate.
    pub fn new(columns: u32, rows: u32, tiles: Vec<Tile>) -> Result<Self, SimulationError> {
        let expected = u64::from(columns) * u64::from(rows);
        if tiles.len() as u64 != expected {
            return Err(SimulationError::configuration(format!(
                "{columns}x{rows} grid requires {expected} tiles, received {}",
                tiles.len()
            )));
        }

        for (index, tile) in tiles.iter().enumerate() {
            let coord = tile.coord();
            let column = index as u64 % u64::from(columns.max(1));
            let row = index as u64 / u64::from(columns.max(1));
            if u64::from(coord.column()) != column || u64::from(coord.row()) != row {
                return Err(SimulationError::configuration(format!(
                    "tile at index {index} reports coordinate ({}, {})",
                    coord.column(),
                    coord.row()
                )));
            }
        }

        Ok(Self {
            columns,
            rows,
            tiles,
            tower_tiles: Vec::new(),
            declared_towers: 0,
            spawner_tiles: Vec::new(),
            declared_spawners: 0,
            enemy_visual: TileVisual::new(0),
            consumed_spawner_visual: None,
        })
    }

    /// Attaches the sparse tower tile list and the number of towers it must contain.
    #[must_use]
    pub fn with_towers(mut self, tiles: Vec<Option<Tile>>, declared: usize) -> Self {
        self.tower_tiles = tiles;
        self.declared_towers = declared;
        self
    }

    /// Attaches the sparse spawner tile list and the number of spawners it must contain.
    #[must_use]
    pub fn with_spawners(mut self, tiles: Vec<Option<Tile>>, declared: usize) -> Self {
        self.spawner_tiles = tiles;
        self.declared_spawners = declared;
        self
    }

    /// Sprite assigned to every spawned enemy.
    #[must_use]
    pub fn with_enemy_visual(mut self, visual: TileVisual) -> Self {
        self.enemy_visual = visual;
        self
    }

    /// Sprite written into a spawner's level tile each time it produces an enemy.
    #[must_use]
    pub fn with_consumed_spawner_visual(mut self, visual: TileVisual) -> Self {
        self.consumed_spawner_visual = Some(visual);
        self
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    pub(crate) fn into_parts(self) -> LevelParts {
        LevelParts {
            columns: self.columns,
            rows: self.rows,
            tiles: self.tiles,
            tower_tiles: self.tower_tiles,
            declared_towers: self.declared_towers,
            spawner_tiles: self.spawner_tiles,
            declared_spawners: self.declared_spawners,
            enemy_visual: self.enemy_visual,
            consumed_spawner_visual: self.consumed_spawner_visual,
        }
    }
}

pub(crate) struct LevelParts {
    pub(crate) columns: u32,
    pub(crate) rows: u32,
    pub(crate) tiles: Vec<Tile>,
    pub(crate) tower_tiles: Vec<Option<Tile>>,
    pub(crate) declared_towers: usize,
    pub(crate) spawner_tiles: Vec<Option<Tile>>,
    pub(crate) declared_spawners: usize,
    pub(crate) enemy_visual: TileVisual,
    pub(crate) consumed_spawner_visual: Option<TileVisual>,
}

/// Takes the first `declared` non-empty tiles from a sparse list.
///
/// Running out of tiles before `declared` entries were found is a
/// configuration fault rather than a scan past the end of the list.
pub(crate) fn collect_declared(
    tiles: &[Option<Tile>],
    declared: usize,
    kind: &str,
    columns: u32,
    rows: u32,
) -> Result<Vec<Tile>, SimulationError> {
    let collected: Vec<Tile> = tiles.iter().flatten().copied().take(declared).collect();
    if collected.len() < declared {
        return Err(SimulationError::configuration(format!(
            "level declares {declared} {kind} tiles but only {} are present",
            collected.len()
        )));
    }

    if let Some(outside) = collected
        .iter()
        .find(|tile| !within(tile.coord(), columns, rows))
    {
        return Err(SimulationError::configuration(format!(
            "{kind} tile ({}, {}) lies outside the {columns}x{rows} grid",
            outside.coord().column(),
            outside.coord().row()
        )));
    }

    Ok(collected)
}

fn within(coord: TileCoord, columns: u32, rows: u32) -> bool {
    coord.column() < columns && coord.row() < rows
}
