use tile_defence_core::{
    Command, EnemyId, Event, GameConfig, InputSnapshot, PixelPosition, SpawnerId, Tile,
    TileCoord, TileVisual,
};
use tile_defence_system_collision::CollisionResolver;
use tile_defence_system_movement::Movement;
use tile_defence_world::{self as world, query, Level, World};

fn level_with_solids(columns: u32, rows: u32, solid: &[(u32, u32)]) -> Level {
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
    Level::new(columns, rows, tiles).expect("valid level")
}

fn marker(column: u32, row: u32) -> Option<Tile> {
    Some(Tile::new(
        TileCoord::new(column, row),
        false,
        TileVisual::new(2),
    ))
}

fn spawn_all(world: &mut World) {
    let mut events = Vec::new();
    for spawner in query::spawners(world) {
        world::apply(
            world,
            Command::SpawnEnemy {
                spawner: spawner.id,
            },
            &mut events,
        );
    }
}

fn step(world: &mut World, movement: &mut Movement, input: InputSnapshot) -> Vec<Event> {
    let mut commands = Vec::new();
    movement.handle(
        input,
        &query::enemy_view(world),
        query::tile_grid(world),
        &mut commands,
    );
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

const RIGHT: InputSnapshot = InputSnapshot {
    up: false,
    down: false,
    left: false,
    right: true,
};

#[test]
fn idle_input_emits_nothing() {
    let mut movement = Movement::default();
    let world = World::new(
        level_with_solids(3, 3, &[]).with_spawners(vec![marker(1, 1)], 1),
        &GameConfig::default(),
    )
    .expect("world");
    let mut commands = Vec::new();

    movement.handle(
        InputSnapshot::default(),
        &query::enemy_view(&world),
        query::tile_grid(&world),
        &mut commands,
    );

    assert!(commands.is_empty());
}

#[test]
fn camera_moves_even_when_every_tile_is_solid() {
    let solids: Vec<(u32, u32)> = (0..3)
        .flat_map(|row| (0..3).map(move |column| (column, row)))
        .collect();
    let mut world = World::new(level_with_solids(3, 3, &solids), &GameConfig::default())
        .expect("world");
    let mut movement = Movement::default();

    let events = step(
        &mut world,
        &mut movement,
        InputSnapshot {
            up: true,
            left: true,
            ..InputSnapshot::default()
        },
    );

    assert_eq!(
        events,
        vec![Event::CameraMoved {
            position: PixelPosition::new(-1, -1)
        }]
    );
}

#[test]
fn enemies_resolve_collision_independently() {
    // Spawner 0 sits next to a wall on its right, spawner 1 has open floor.
    let level = level_with_solids(6, 4, &[(2, 0)])
        .with_spawners(vec![marker(1, 0), marker(1, 2)], 2);
    let mut world = World::new(level, &GameConfig::default()).expect("world");
    spawn_all(&mut world);
    let mut movement = Movement::default();

    // The first enemy advances 4 pixels per step until the next step would
    // round onto the wall at column 2.
    for _ in 0..64 {
        let _ = step(&mut world, &mut movement, RIGHT);
    }

    let enemies = query::enemy_view(&world).into_vec();
    assert_eq!(enemies[0].position, PixelPosition::new(192, 0));
    assert_eq!(enemies[1].position, PixelPosition::new(128 + 4 * 64, 64));
    assert_eq!(query::camera_position(&world), PixelPosition::new(64, 0));
}

#[test]
fn blocked_enemy_position_is_stable() {
    let level = level_with_solids(4, 4, &[(1, 1)]).with_spawners(vec![marker(1, 0)], 1);
    let mut world = World::new(level, &GameConfig::default()).expect("world");
    spawn_all(&mut world);
    let mut movement = Movement::default();
    let down = InputSnapshot {
        down: true,
        ..InputSnapshot::default()
    };

    let mut moves = Vec::new();
    for _ in 0..40 {
        moves.extend(
            step(&mut world, &mut movement, down)
                .into_iter()
                .filter(|event| matches!(event, Event::EnemyMoved { .. })),
        );
    }

    // Rows round half up, so the enemy advances 15 pixels before row 1 blocks it.
    assert_eq!(moves.len(), 15);
    let enemy = query::enemy_view(&world).into_vec()[0];
    assert_eq!(enemy.position, PixelPosition::new(128, 15));
}

#[test]
fn grid_edge_blocks_like_a_solid_tile() {
    let level = level_with_solids(2, 2, &[]).with_spawners(vec![marker(0, 0)], 1);
    let mut world = World::new(level, &GameConfig::default()).expect("world");
    spawn_all(&mut world);
    let mut movement = Movement::default();
    let up = InputSnapshot {
        up: true,
        ..InputSnapshot::default()
    };

    let mut moves = 0;
    for _ in 0..40 {
        let events = step(&mut world, &mut movement, up);
        moves += events
            .iter()
            .filter(|event| matches!(event, Event::EnemyMoved { .. }))
            .count();
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::CameraMoved { .. })));
    }

    // Row 0 still rounds to the grid down to y = -16; beyond that lies outside.
    assert_eq!(moves, 16);
    let enemy = query::enemy_view(&world).into_vec()[0];
    assert_eq!(enemy.position, PixelPosition::new(0, -16));
}

#[test]
fn custom_resolver_changes_horizontal_scaling() {
    let config = GameConfig {
        horizontal_multiplier: 1,
        ..GameConfig::default()
    };
    let level = level_with_solids(4, 4, &[]).with_spawners(vec![marker(1, 1)], 1);
    let mut world = World::new(level, &config).expect("world");
    spawn_all(&mut world);
    let mut movement = Movement::new(CollisionResolver::from_config(&config));

    let events = step(&mut world, &mut movement, RIGHT);

    assert!(events.contains(&Event::EnemyMoved {
        enemy: EnemyId::new(0),
        from: PixelPosition::new(128, 32),
        to: PixelPosition::new(129, 32),
    }));
    assert_eq!(
        query::spawners(&world)[0].id,
        SpawnerId::new(0),
        "spawner identifiers follow creation order"
    );
}
