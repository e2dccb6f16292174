#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Tile Defence.

mod entities;
mod level;
mod pool;

pub use entities::{Camera, Enemy, EnemySpawn, Entity, Mob, Tower};
pub use level::Level;

use tile_defence_core::{
    Command, EnemyId, Event, GameConfig, InputSnapshot, PixelPosition, SimulationError,
    SpawnerId, Tile, TileCoord, TileMetrics, TileVisual, TowerId,
};
use tracing::{debug, info, warn};

use crate::{level::collect_declared, pool::EnemyPool};

/// Represents the authoritative Tile Defence world state.
#[derive(Debug)]
pub struct World {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
    towers: Vec<Tower>,
    spawners: Vec<EnemySpawn>,
    enemies: EnemyPool,
    camera: Camera,
    tick: u64,
    input: InputSnapshot,
    enemy_visual: TileVisual,
    consumed_spawner_visual: Option<TileVisual>,
}

impl World {
    /// Creates a world from loaded level data.
    ///
    /// Malformed level data or configuration surfaces as
    /// [`SimulationError::ConfigurationFault`] so the game loop never starts.
    pub fn new(level: Level, config: &GameConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let parts = level.into_parts();
        let metrics = config.tile_metrics;
        if metrics
            .origin_of(TileCoord::new(parts.columns, parts.rows))
            .is_none()
        {
            return Err(SimulationError::configuration(format!(
                "{}x{} grid of {}x{} px tiles exceeds the pixel coordinate range",
                parts.columns,
                parts.rows,
                metrics.width_px(),
                metrics.height_px()
            )));
        }

        let towers = collect_declared(
            &parts.tower_tiles,
            parts.declared_towers,
            "tower",
            parts.columns,
            parts.rows,
        )?
        .into_iter()
        .enumerate()
        .map(|(index, tile)| {
            Ok(Tower::new(
                TowerId::new(index as u32),
                tile,
                origin(metrics, tile)?,
            ))
        })
        .collect::<Result<Vec<_>, SimulationError>>()?;

        let spawners = collect_declared(
            &parts.spawner_tiles,
            parts.declared_spawners,
            "spawner",
            parts.columns,
            parts.rows,
        )?
        .into_iter()
        .enumerate()
        .map(|(index, tile)| {
            Ok(EnemySpawn::new(
                SpawnerId::new(index as u32),
                tile,
                origin(metrics, tile)?,
            ))
        })
        .collect::<Result<Vec<_>, SimulationError>>()?;

        info!(
            columns = parts.columns,
            rows = parts.rows,
            towers = towers.len(),
            spawners = spawners.len(),
            enemy_capacity = config.enemy_capacity,
            "world_created"
        );

        Ok(Self {
            columns: parts.columns,
            rows: parts.rows,
            tiles: parts.tiles,
            towers,
            spawners,
            enemies: EnemyPool::with_capacity(config.enemy_capacity),
            camera: Camera::default(),
            tick: 0,
            input: InputSnapshot::default(),
            enemy_visual: parts.enemy_visual,
            consumed_spawner_visual: parts.consumed_spawner_visual,
        })
    }

    fn spawn_enemy(&mut self, spawner_id: SpawnerId, out_events: &mut Vec<Event>) {
        let Some(spawner) = self
            .spawners
            .iter()
            .find(|spawner| spawner.id() == spawner_id)
            .cloned()
        else {
            warn!(spawner = spawner_id.get(), "unknown_spawner");
            out_events.push(Event::SpawnRejected {
                spawner: spawner_id,
                reason: SimulationError::configuration(format!(
                    "spawner {} does not exist",
                    spawner_id.get()
                )),
            });
            return;
        };

        let coord = spawner.tile().coord();
        let position = spawner.position();
        let enemy_tile = Tile::new(coord, false, self.enemy_visual);
        match self
            .enemies
            .insert_with(|id| Enemy::new(id, enemy_tile, position))
        {
            Ok(enemy) => {
                if let Some(visual) = self.consumed_spawner_visual {
                    self.rewrite_visual(coord.column(), coord.row(), visual);
                }
                info!(
                    enemy = enemy.get(),
                    spawner = spawner_id.get(),
                    x = position.x(),
                    y = position.y(),
                    "enemy_created"
                );
                out_events.push(Event::EnemySpawned {
                    enemy,
                    spawner: spawner_id,
                    position,
                });
            }
            Err(reason) => {
                warn!(spawner = spawner_id.get(), error = %reason, "spawn_rejected");
                out_events.push(Event::SpawnRejected {
                    spawner: spawner_id,
                    reason,
                });
            }
        }
    }

    fn rewrite_visual(&mut self, column: u32, row: u32, visual: TileVisual) {
        let index = u64::from(row) * u64::from(self.columns) + u64::from(column);
        let Ok(index) = usize::try_from(index) else {
            return;
        };
        if let Some(tile) = self.tiles.get_mut(index) {
            *tile = tile.with_visual(visual);
        }
    }

    fn move_enemy(&mut self, id: EnemyId, dx: i32, dy: i32, out_events: &mut Vec<Event>) {
        let Some(enemy) = self.enemies.get_mut(id) else {
            debug!(enemy = id.get(), "move_for_unknown_enemy");
            return;
        };
        let from = enemy.position();
        enemy.move_by(dx, dy);
        let to = enemy.position();
        debug!(enemy = id.get(), dx, dy, "enemy_moved");
        out_events.push(Event::EnemyMoved { enemy: id, from, to });
    }
}

fn origin(metrics: TileMetrics, tile: Tile) -> Result<PixelPosition, SimulationError> {
    metrics.origin_of(tile.coord()).ok_or_else(|| {
        SimulationError::configuration(format!(
            "tile ({}, {}) lies outside the pixel coordinate range",
            tile.coord().column(),
            tile.coord().row()
        ))
    })
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.tick = world.tick.saturating_add(1);
            out_events.push(Event::TimeAdvanced { tick: world.tick });
        }
        Command::SetInput { input } => {
            if world.input != input {
                world.input = input;
                out_events.push(Event::InputChanged { input });
            }
        }
        Command::UpdateTowers => {
            for tower in world.towers.iter_mut() {
                tower.update();
                debug!(tower = tower.id().get(), "tower_updated");
            }
            out_events.push(Event::TowersUpdated {
                count: world.towers.len(),
            });
        }
        Command::SpawnEnemy { spawner } => world.spawn_enemy(spawner, out_events),
        Command::MoveCamera { dx, dy } => {
            world.camera.move_by(dx, dy);
            out_events.push(Event::CameraMoved {
                position: world.camera.position(),
            });
        }
        Command::MoveEnemy { enemy, dx, dy } => world.move_enemy(enemy, dx, dy, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use tile_defence_core::{
        EnemySnapshot, EnemyView, InputSnapshot, PixelPosition, SpawnerSnapshot, TileGridView,
    };

    use super::{Enemy, Entity, Tower, World};

    /// Exposes a read-only view of the tile grid.
    #[must_use]
    pub fn tile_grid(world: &World) -> TileGridView<'_> {
        TileGridView::new(&world.tiles, world.columns, world.rows)
    }

    /// Captures a read-only view of the live enemies in pool order.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().filter_map(snapshot).collect())
    }

    /// Enumerates the spawners in creation order.
    #[must_use]
    pub fn spawners(world: &World) -> Vec<SpawnerSnapshot> {
        world
            .spawners
            .iter()
            .map(|spawner| SpawnerSnapshot {
                id: spawner.id(),
                position: spawner.position(),
            })
            .collect()
    }

    /// Provides read-only access to the towers.
    #[must_use]
    pub fn towers(world: &World) -> &[Tower] {
        &world.towers
    }

    /// Current camera position; the render origin.
    #[must_use]
    pub fn camera_position(world: &World) -> PixelPosition {
        world.camera.position()
    }

    /// Value of the monotonically increasing tick counter.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick
    }

    /// Directional input consumed by the next movement pass.
    #[must_use]
    pub fn input(world: &World) -> InputSnapshot {
        world.input
    }

    /// Number of occupied enemy slots.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Fixed number of enemy slots.
    #[must_use]
    pub fn enemy_capacity(world: &World) -> usize {
        world.enemies.capacity()
    }

    // Only entities that render a tile appear in the view.
    fn snapshot(enemy: &Enemy) -> Option<EnemySnapshot> {
        Some(EnemySnapshot {
            id: enemy.id(),
            position: enemy.position(),
            tile: enemy.render()?,
        })
    }
}
