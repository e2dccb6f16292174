use tile_defence_core::{PixelPosition, Tile, TileCoord, TileGridView, TileVisual};
use tile_defence_system_collision::{AxisMove, CollisionResolver};

fn grid_with_solids(columns: u32, rows: u32, solid: &[(u32, u32)]) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity((columns * rows) as usize);
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

// Pixel position whose nearest tile is (2, 2) under the 128x32 footprint.
const ON_TILE_2_2: PixelPosition = PixelPosition::new(256, 64);

#[test]
fn solid_tile_blocks_horizontal_step() {
    let tiles = grid_with_solids(10, 10, &[(3, 2)]);
    let grid = TileGridView::new(&tiles, 10, 10);
    let resolver = CollisionResolver::default();

    let step = resolver.resolve_axis_move(&grid, ON_TILE_2_2, 128, 0);

    assert_eq!(
        step,
        AxisMove::Blocked {
            tile: TileCoord::new(3, 2)
        }
    );
    let (dx, dy) = step.delta();
    assert_eq!(
        ON_TILE_2_2.translated(dx, dy),
        ON_TILE_2_2,
        "blocked axis must leave the position untouched"
    );
}

#[test]
fn open_tile_accepts_unscaled_vertical_step() {
    let tiles = grid_with_solids(10, 10, &[(3, 2)]);
    let grid = TileGridView::new(&tiles, 10, 10);
    let resolver = CollisionResolver::default();

    let step = resolver.resolve_axis_move(&grid, ON_TILE_2_2, 0, 32);

    assert_eq!(step, AxisMove::Allowed { dx: 0, dy: 32 });
    let (dx, dy) = step.delta();
    assert_eq!(ON_TILE_2_2.translated(dx, dy), PixelPosition::new(256, 96));
}

#[test]
fn open_tile_scales_horizontal_step_by_four() {
    let tiles = grid_with_solids(10, 10, &[]);
    let grid = TileGridView::new(&tiles, 10, 10);

    let step = CollisionResolver::default().resolve_axis_move(&grid, ON_TILE_2_2, 1, 0);

    assert_eq!(step, AxisMove::Allowed { dx: 4, dy: 0 });
}

#[test]
fn diagonal_into_corner_slides_along_open_axis() {
    // Solid tile to the right, open tile below.
    let tiles = grid_with_solids(10, 10, &[(3, 2)]);
    let grid = TileGridView::new(&tiles, 10, 10);

    let resolved = CollisionResolver::default().resolve_move(&grid, ON_TILE_2_2, 128, 32);

    assert!(resolved.horizontal.is_blocked());
    assert!(!resolved.vertical.is_blocked());
    assert_eq!(resolved.delta(), (0, 32));
}

#[test]
fn diagonal_with_blocked_vertical_still_moves_horizontally() {
    // Open tile to the right, wall below both the current and the next column.
    let tiles = grid_with_solids(10, 10, &[(2, 3), (3, 3)]);
    let grid = TileGridView::new(&tiles, 10, 10);
    let start = PixelPosition::new(256, 64);

    let resolved = CollisionResolver::default().resolve_move(&grid, start, 1, 32);

    assert_eq!(resolved.horizontal, AxisMove::Allowed { dx: 4, dy: 0 });
    assert!(resolved.vertical.is_blocked());
    assert_eq!(resolved.delta(), (4, 0));
}

#[test]
fn vertical_step_uses_position_after_horizontal_step() {
    // Starts on column 2 right at the rounding edge; one step right lands on
    // column 3. The tile below column 3 is solid, the one below column 2 open.
    let tiles = grid_with_solids(10, 10, &[(3, 3)]);
    let grid = TileGridView::new(&tiles, 10, 10);
    let start = PixelPosition::new(319, 64);

    let resolved = CollisionResolver::default().resolve_move(&grid, start, 1, 32);

    assert_eq!(resolved.horizontal.delta(), (4, 0));
    assert_eq!(
        resolved.vertical,
        AxisMove::Blocked {
            tile: TileCoord::new(3, 3)
        }
    );
}

#[test]
fn destination_outside_grid_is_blocked() {
    let tiles = grid_with_solids(2, 2, &[]);
    let grid = TileGridView::new(&tiles, 2, 2);
    let edge = PixelPosition::new(128, 32);

    let resolved = CollisionResolver::default().resolve_move(&grid, edge, 128, 32);

    assert!(matches!(resolved.horizontal, AxisMove::OutOfRange { .. }));
    assert!(matches!(resolved.vertical, AxisMove::OutOfRange { .. }));
    assert_eq!(resolved.delta(), (0, 0));
}

#[test]
fn blocked_axis_never_changes_position_over_many_attempts() {
    let tiles = grid_with_solids(4, 4, &[(1, 0)]);
    let grid = TileGridView::new(&tiles, 4, 4);
    let resolver = CollisionResolver::default();
    let mut position = PixelPosition::new(0, 0);

    for _ in 0..50 {
        let (dx, dy) = resolver.resolve_move(&grid, position, 64, 0).delta();
        position = position.translated(dx, dy);
    }

    assert_eq!(position, PixelPosition::new(0, 0));
}
