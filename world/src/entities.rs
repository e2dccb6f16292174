//! Entity variants and the capabilities they expose.
//!
//! Every variant spells out each capability explicitly, including the no-ops,
//! so nothing is inherited from shared base state.

use tile_defence_core::{EnemyId, PixelPosition, SpawnerId, Tile, TowerId};

/// Capabilities shared by every entity in the simulation.
pub trait Entity {
    /// Runs the entity's per-tick logic.
    fn update(&mut self);

    /// Tile this entity draws on top of the level, if any.
    fn render(&self) -> Option<Tile>;

    /// Current world position in pixels.
    fn position(&self) -> PixelPosition;

    /// Marks the entity for removal.
    ///
    /// Removal is not wired into the simulation: entities are never reclaimed
    /// and every implementation currently ignores the request.
    fn remove(&mut self);

    /// Reports whether the entity was removed. Always `false` for now.
    fn is_removed(&self) -> bool;
}

/// Entities that can be translated through the world.
pub trait Mob: Entity {
    /// Translates the entity by the provided offset.
    fn move_by(&mut self, dx: i32, dy: i32);
}

/// Stationary tower occupying a tile of the level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tower {
    id: TowerId,
    tile: Tile,
    position: PixelPosition,
}

impl Tower {
    pub(crate) fn new(id: TowerId, tile: Tile, position: PixelPosition) -> Self {
        Self { id, tile, position }
    }

    /// Identifier allocated to the tower.
    #[must_use]
    pub const fn id(&self) -> TowerId {
        self.id
    }

    /// Level tile the tower was created from.
    #[must_use]
    pub const fn tile(&self) -> Tile {
        self.tile
    }
}

impl Entity for Tower {
    // Attack logic hooks in here.
    fn update(&mut self) {}

    // Drawn as part of the level.
    fn render(&self) -> Option<Tile> {
        None
    }

    fn position(&self) -> PixelPosition {
        self.position
    }

    fn remove(&mut self) {}

    fn is_removed(&self) -> bool {
        false
    }
}

/// Stationary marker that produces enemies at its position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemySpawn {
    id: SpawnerId,
    tile: Tile,
    position: PixelPosition,
}

impl EnemySpawn {
    pub(crate) fn new(id: SpawnerId, tile: Tile, position: PixelPosition) -> Self {
        Self { id, tile, position }
    }

    /// Identifier allocated to the spawner.
    #[must_use]
    pub const fn id(&self) -> SpawnerId {
        self.id
    }

    /// Level tile that marks the spawner.
    #[must_use]
    pub const fn tile(&self) -> Tile {
        self.tile
    }
}

impl Entity for EnemySpawn {
    fn update(&mut self) {}

    fn render(&self) -> Option<Tile> {
        None
    }

    fn position(&self) -> PixelPosition {
        self.position
    }

    fn remove(&mut self) {}

    fn is_removed(&self) -> bool {
        false
    }
}

/// Mobile enemy drawn with its own tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    id: EnemyId,
    tile: Tile,
    position: PixelPosition,
}

impl Enemy {
    pub(crate) fn new(id: EnemyId, tile: Tile, position: PixelPosition) -> Self {
        Self { id, tile, position }
    }

    /// Identifier allocated to the enemy.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }
}

impl Entity for Enemy {
    // Enemies only move when the game loop moves them.
    fn update(&mut self) {}

    fn render(&self) -> Option<Tile> {
        Some(self.tile)
    }

    fn position(&self) -> PixelPosition {
        self.position
    }

    fn remove(&mut self) {}

    fn is_removed(&self) -> bool {
        false
    }
}

impl Mob for Enemy {
    fn move_by(&mut self, dx: i32, dy: i32) {
        self.position = self.position.translated(dx, dy);
    }
}

/// Position-only mob that defines the render origin. Ignores collision.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Camera {
    position: PixelPosition,
}

impl Entity for Camera {
    fn update(&mut self) {}

    fn render(&self) -> Option<Tile> {
        None
    }

    fn position(&self) -> PixelPosition {
        self.position
    }

    fn remove(&mut self) {}

    fn is_removed(&self) -> bool {
        false
    }
}

impl Mob for Camera {
    fn move_by(&mut self, dx: i32, dy: i32) {
        self.position = self.position.translated(dx, dy);
    }
}
