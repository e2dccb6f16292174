#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawn scheduler responsible for emitting enemy spawn commands.

use tile_defence_core::{Command, Event, GameConfig, SpawnerSnapshot, SPAWN_INTERVAL_TICKS};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval_ticks: u64,
}

impl Config {
    /// Creates a new configuration firing every `spawn_interval_ticks` ticks.
    #[must_use]
    pub const fn new(spawn_interval_ticks: u64) -> Self {
        Self {
            spawn_interval_ticks,
        }
    }

    /// Extracts the spawn cadence from the session configuration.
    #[must_use]
    pub const fn from_game_config(config: &GameConfig) -> Self {
        Self::new(config.spawn_interval_ticks)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(SPAWN_INTERVAL_TICKS)
    }
}

/// Pure system that fires every spawner whenever the tick counter hits the interval.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval_ticks: u64,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval_ticks: config.spawn_interval_ticks,
        }
    }

    /// Consumes tick events and the spawner list to emit spawn commands.
    ///
    /// Each tick divisible by the interval yields exactly one
    /// [`Command::SpawnEnemy`] per spawner, in spawner order.
    pub fn handle(
        &mut self,
        events: &[Event],
        spawners: &[SpawnerSnapshot],
        out: &mut Vec<Command>,
    ) {
        if self.spawn_interval_ticks == 0 || spawners.is_empty() {
            return;
        }

        for event in events {
            let Event::TimeAdvanced { tick } = event else {
                continue;
            };
            if !self.is_due(*tick) {
                continue;
            }
            out.reserve(spawners.len());
            for spawner in spawners {
                out.push(Command::SpawnEnemy {
                    spawner: spawner.id,
                });
            }
        }
    }

    fn is_due(&self, tick: u64) -> bool {
        tick != 0 && tick % self.spawn_interval_ticks == 0
    }
}

impl Default for Spawning {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
