//! TOML level descriptors: a character layout plus a legend.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use tile_defence_core::{SimulationError, Tile, TileCoord, TileMetrics, TileVisual};
use tile_defence_rendering::{Color, SpriteAtlas};
use tile_defence_world::Level;

const DEFAULT_BACKGROUND: [u8; 3] = [0x12, 0x12, 0x1a];
const DEFAULT_ENEMY_COLOR: [u8; 3] = [0xd0, 0x30, 0x30];

/// Role a legend character plays besides providing a grid tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum TileRole {
    /// Plain grid tile.
    #[default]
    Floor,
    /// Grid tile that also hosts a tower.
    Tower,
    /// Grid tile that also hosts an enemy spawner.
    Spawner,
}

/// Legend entry describing one layout character.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct LegendEntry {
    visual: u16,
    #[serde(default)]
    solid: bool,
    #[serde(default)]
    role: TileRole,
    color: Option<[u8; 3]>,
}

/// Level descriptor as written on disk.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct LevelDescriptor {
    legend: BTreeMap<String, LegendEntry>,
    rows: Vec<String>,
    enemy_visual: u16,
    enemy_color: Option<[u8; 3]>,
    consumed_spawner_visual: Option<u16>,
    consumed_spawner_color: Option<[u8; 3]>,
    background: Option<[u8; 3]>,
}

/// Level and presentation data produced from a descriptor.
#[derive(Debug)]
pub(crate) struct LoadedLevel {
    pub(crate) level: Level,
    pub(crate) sprites: SpriteAtlas,
    pub(crate) background: Color,
}

impl LevelDescriptor {
    /// Parses a descriptor; syntax errors become configuration faults.
    pub(crate) fn from_toml_str(text: &str) -> Result<Self, SimulationError> {
        toml::from_str(text)
            .map_err(|error| SimulationError::configuration(format!("invalid level file: {error}")))
    }

    /// Expands the layout into a [`Level`] and a procedural sprite atlas.
    pub(crate) fn build(&self, metrics: TileMetrics) -> Result<LoadedLevel, SimulationError> {
        let legend = self.legend()?;
        let (columns, rows) = self.dimensions()?;

        let mut tiles = Vec::with_capacity(columns as usize * rows as usize);
        let mut towers = Vec::with_capacity(tiles.capacity());
        let mut spawners = Vec::with_capacity(tiles.capacity());
        for (row, line) in (0u32..).zip(&self.rows) {
            for (column, symbol) in (0u32..).zip(line.chars()) {
                let entry = legend.get(&symbol).ok_or_else(|| {
                    SimulationError::configuration(format!(
                        "unknown layout character {symbol:?} at column {column}, row {row}"
                    ))
                })?;
                let tile = Tile::new(
                    TileCoord::new(column, row),
                    entry.solid,
                    TileVisual::new(entry.visual),
                );
                tiles.push(tile);
                towers.push((entry.role == TileRole::Tower).then_some(tile));
                spawners.push((entry.role == TileRole::Spawner).then_some(tile));
            }
        }

        let declared_towers = towers.iter().flatten().count();
        let declared_spawners = spawners.iter().flatten().count();
        let mut level = Level::new(columns, rows, tiles)?
            .with_towers(towers, declared_towers)
            .with_spawners(spawners, declared_spawners)
            .with_enemy_visual(TileVisual::new(self.enemy_visual));
        if let Some(visual) = self.consumed_spawner_visual {
            level = level.with_consumed_spawner_visual(TileVisual::new(visual));
        }

        Ok(LoadedLevel {
            level,
            sprites: SpriteAtlas::from_palette(metrics, &self.palette()),
            background: rgb(self.background.unwrap_or(DEFAULT_BACKGROUND)),
        })
    }

    fn legend(&self) -> Result<HashMap<char, &LegendEntry>, SimulationError> {
        self.legend
            .iter()
            .map(|(key, entry)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Ok((symbol, entry)),
                    _ => Err(SimulationError::configuration(format!(
                        "legend key {key:?} must be a single character"
                    ))),
                }
            })
            .collect()
    }

    fn dimensions(&self) -> Result<(u32, u32), SimulationError> {
        let Some(first) = self.rows.first() else {
            return Err(SimulationError::configuration("level layout has no rows"));
        };
        let columns = first.chars().count();
        if columns == 0 {
            return Err(SimulationError::configuration("level layout has empty rows"));
        }
        if let Some((index, line)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, line)| line.chars().count() != columns)
        {
            return Err(SimulationError::configuration(format!(
                "row {index} has {} columns, expected {columns}",
                line.chars().count()
            )));
        }

        let columns = u32::try_from(columns)
            .map_err(|_| SimulationError::configuration("level layout is too wide"))?;
        let rows = u32::try_from(self.rows.len())
            .map_err(|_| SimulationError::configuration("level layout is too tall"))?;
        Ok((columns, rows))
    }

    fn palette(&self) -> Vec<(TileVisual, Color)> {
        let mut palette: Vec<(TileVisual, Color)> = self
            .legend
            .values()
            .filter_map(|entry| Some((TileVisual::new(entry.visual), rgb(entry.color?))))
            .collect();
        palette.push((
            TileVisual::new(self.enemy_visual),
            rgb(self.enemy_color.unwrap_or(DEFAULT_ENEMY_COLOR)),
        ));
        if let (Some(visual), Some(color)) =
            (self.consumed_spawner_visual, self.consumed_spawner_color)
        {
            palette.push((TileVisual::new(visual), rgb(color)));
        }
        palette
    }
}

const fn rgb([red, green, blue]: [u8; 3]) -> Color {
    Color::from_rgb_u8(red, green, blue)
}
