#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-order game loop wiring the world, the systems and the renderer.
//!
//! Every [`Game::update`] runs the same pipeline: advance the tick and let the
//! spawn scheduler react, update towers, move the camera and enemies from the
//! current input, then clear the frame, draw the level and draw every enemy in
//! pool order.

use tile_defence_core::{
    Command, Event, GameConfig, InputSnapshot, SimulationError, SpawnerSnapshot,
};
use tile_defence_rendering::{Color, FrameBuffer, Renderer, SpriteSheet};
use tile_defence_system_collision::CollisionResolver;
use tile_defence_system_movement::Movement;
use tile_defence_system_spawning::{Config as SpawningConfig, Spawning};
use tile_defence_world::{self as world, query, Level, World};
use tracing::debug;

/// Owns the simulation state and drives one frame per [`Game::update`].
#[derive(Debug)]
pub struct Game<S> {
    world: World,
    spawning: Spawning,
    movement: Movement,
    renderer: Renderer<S>,
    spawners: Vec<SpawnerSnapshot>,
    events: Vec<Event>,
}

impl<S: SpriteSheet> Game<S> {
    /// Builds the world from level data and prepares the systems.
    ///
    /// Any fault in the level or configuration is reported here, before the
    /// first update.
    pub fn new(level: Level, config: &GameConfig, sheet: S) -> Result<Self, SimulationError> {
        let world = World::new(level, config)?;
        let renderer = Renderer::new(sheet, config.viewport, config.tile_metrics)
            .map_err(|error| SimulationError::configuration(error.to_string()))?;
        let spawners = query::spawners(&world);

        Ok(Self {
            world,
            spawning: Spawning::new(SpawningConfig::from_game_config(config)),
            movement: Movement::new(CollisionResolver::from_config(config)),
            renderer,
            spawners,
            events: Vec::new(),
        })
    }

    /// Sets the colour the frame is cleared to.
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.renderer = self.renderer.with_background(background);
        self
    }

    /// Replaces the directional input consumed by the following updates.
    pub fn set_input(&mut self, input: InputSnapshot) {
        self.dispatch(Command::SetInput { input });
    }

    /// Advances the simulation by one tick and renders the resulting frame.
    ///
    /// Returns every event produced since the previous update, including
    /// rejected spawns, so callers can report per-tick faults.
    pub fn update(&mut self) -> Vec<Event> {
        let tick_start = self.events.len();
        self.dispatch(Command::Tick);

        let mut commands = Vec::new();
        self.spawning
            .handle(&self.events[tick_start..], &self.spawners, &mut commands);
        self.dispatch_all(&mut commands);

        self.dispatch(Command::UpdateTowers);

        self.movement.handle(
            query::input(&self.world),
            &query::enemy_view(&self.world),
            query::tile_grid(&self.world),
            &mut commands,
        );
        self.dispatch_all(&mut commands);

        self.render();

        debug!(
            tick = query::tick(&self.world),
            enemies = query::enemy_count(&self.world),
            events = self.events.len(),
            "frame_completed"
        );
        std::mem::take(&mut self.events)
    }

    /// Last rendered frame as RGBA8 bytes.
    #[must_use]
    pub fn pixel_array(&self) -> &[u8] {
        self.renderer.pixel_array()
    }

    /// Copy of the last rendered frame, safe to hand to another thread.
    #[must_use]
    pub fn snapshot_frame(&self) -> Vec<u8> {
        self.renderer.pixel_array().to_vec()
    }

    /// Last rendered frame.
    #[must_use]
    pub fn frame(&self) -> &FrameBuffer {
        self.renderer.frame()
    }

    /// Read-only access to the world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    fn render(&mut self) {
        self.renderer.clear();
        self.renderer.render_level(
            &query::tile_grid(&self.world),
            query::camera_position(&self.world),
        );
        for enemy in query::enemy_view(&self.world).iter() {
            self.renderer
                .render_mob(enemy.position.x(), enemy.position.y(), &enemy.tile);
        }
    }

    fn dispatch(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.events);
    }

    fn dispatch_all(&mut self, commands: &mut Vec<Command>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }
}
