use std::collections::HashSet;

use glam::IVec2;
use tile_defence_core::{PixelPosition, Tile, TileGridView, TileMetrics, TileVisual, Viewport};
use tracing::warn;

use crate::{Color, FrameBuffer, RenderingError, Sprite, SpriteSheet};

const DEFAULT_BACKGROUND: Color = Color::from_rgb_u8(0x12, 0x12, 0x1a);
const DEFAULT_FALLBACK: Color = Color::from_rgb_u8(0xff, 0x00, 0xff);

/// Composes camera-relative frames from the tile grid and mob tiles.
///
/// The camera offset recorded by [`Renderer::render_level`] is reused by every
/// following [`Renderer::render_mob`] call so level and mobs share one origin.
#[derive(Debug)]
pub struct Renderer<S> {
    sheet: S,
    frame: FrameBuffer,
    metrics: TileMetrics,
    background: Color,
    fallback: Color,
    offset: IVec2,
    warned_missing: HashSet<TileVisual>,
}

impl<S: SpriteSheet> Renderer<S> {
    /// Creates a renderer drawing into a frame sized to the viewport.
    pub fn new(
        sheet: S,
        viewport: Viewport,
        metrics: TileMetrics,
    ) -> Result<Self, RenderingError> {
        Ok(Self {
            sheet,
            frame: FrameBuffer::new(viewport.width, viewport.height)?,
            metrics,
            background: DEFAULT_BACKGROUND,
            fallback: DEFAULT_FALLBACK,
            offset: IVec2::ZERO,
            warned_missing: HashSet::new(),
        })
    }

    /// Overrides the colour used by [`Renderer::clear`].
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Overrides the colour painted where a visual has no sprite.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Color) -> Self {
        self.fallback = fallback;
        self
    }

    /// Fills the whole frame with the background colour.
    pub fn clear(&mut self) {
        self.frame.fill(self.background);
    }

    /// Draws every tile intersecting the viewport as seen from the camera.
    ///
    /// Tiles are drawn opaque in row-major order. The camera position becomes
    /// the offset for subsequent mob draws.
    pub fn render_level(&mut self, grid: &TileGridView<'_>, camera: PixelPosition) {
        self.offset = IVec2::new(camera.x(), camera.y());
        if grid.columns() == 0 || grid.rows() == 0 {
            return;
        }

        let Some((first_column, last_column)) = visible_span(
            camera.x(),
            self.frame.width(),
            self.metrics.width_px(),
            grid.columns(),
        ) else {
            return;
        };
        let Some((first_row, last_row)) = visible_span(
            camera.y(),
            self.frame.height(),
            self.metrics.height_px(),
            grid.rows(),
        ) else {
            return;
        };

        for row in first_row..=last_row {
            for column in first_column..=last_column {
                // The span is clamped to the grid, so lookups cannot fail.
                if let Ok(tile) = grid.tile_at(column, row) {
                    self.draw_tile(&tile);
                }
            }
        }
    }

    /// Draws a mob tile at its world position minus the camera offset.
    ///
    /// Fully transparent sprite pixels leave the frame untouched.
    pub fn render_mob(&mut self, x: i32, y: i32, tile: &Tile) {
        let origin = IVec2::new(x, y) - self.offset;
        self.draw_visual(tile.visual(), origin, true);
    }

    /// Finished frame bytes in RGBA8 row-major order.
    #[must_use]
    pub fn pixel_array(&self) -> &[u8] {
        self.frame.as_bytes()
    }

    /// Finished frame.
    #[must_use]
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    fn draw_tile(&mut self, tile: &Tile) {
        let Some(world) = self.metrics.origin_of(tile.coord()) else {
            return;
        };
        let origin = IVec2::new(world.x(), world.y()) - self.offset;
        self.draw_visual(tile.visual(), origin, false);
    }

    fn draw_visual(&mut self, visual: TileVisual, origin: IVec2, skip_transparent: bool) {
        match self.sheet.sprite(visual) {
            Some(sprite) => blit(&mut self.frame, sprite, origin, skip_transparent),
            None => {
                if self.warned_missing.insert(visual) {
                    warn!(visual = visual.get(), "missing_sprite");
                }
                let size = IVec2::new(
                    i32::try_from(self.metrics.width_px()).unwrap_or(i32::MAX),
                    i32::try_from(self.metrics.height_px()).unwrap_or(i32::MAX),
                );
                fill_rect(&mut self.frame, origin, size, self.fallback);
            }
        }
    }
}

/// Inclusive range of tile indices covering `[camera, camera + extent)`,
/// clamped to the grid. `None` when the window misses the grid entirely.
fn visible_span(camera: i32, extent: u32, tile_size: u32, count: u32) -> Option<(i32, i32)> {
    let tile_size = i64::from(tile_size);
    let start = i64::from(camera);
    let end = start + i64::from(extent) - 1;
    let first = start.div_euclid(tile_size).max(0);
    let last = end.div_euclid(tile_size).min(i64::from(count) - 1);
    if first > last {
        return None;
    }
    Some((i32::try_from(first).ok()?, i32::try_from(last).ok()?))
}

fn blit(frame: &mut FrameBuffer, sprite: &Sprite, origin: IVec2, skip_transparent: bool) {
    let bounds = clip(frame, origin, sprite.width(), sprite.height());
    for y in bounds.min.y..bounds.max.y {
        for x in bounds.min.x..bounds.max.x {
            let local = IVec2::new(x, y) - origin;
            let Some(rgba) = sprite.pixel(local.x as u32, local.y as u32) else {
                continue;
            };
            if skip_transparent && rgba[3] == 0 {
                continue;
            }
            frame.put(IVec2::new(x, y), rgba);
        }
    }
}

fn fill_rect(frame: &mut FrameBuffer, origin: IVec2, size: IVec2, color: Color) {
    let rgba = color.to_rgba();
    let bounds = clip(
        frame,
        origin,
        u32::try_from(size.x).unwrap_or(0),
        u32::try_from(size.y).unwrap_or(0),
    );
    for y in bounds.min.y..bounds.max.y {
        for x in bounds.min.x..bounds.max.x {
            frame.put(IVec2::new(x, y), rgba);
        }
    }
}

struct Bounds {
    min: IVec2,
    max: IVec2,
}

// Intersection of a rectangle with the frame, so off-screen pixels are never visited.
fn clip(frame: &FrameBuffer, origin: IVec2, width: u32, height: u32) -> Bounds {
    let frame_max = IVec2::new(
        i32::try_from(frame.width()).unwrap_or(i32::MAX),
        i32::try_from(frame.height()).unwrap_or(i32::MAX),
    );
    let size = IVec2::new(
        i32::try_from(width).unwrap_or(i32::MAX),
        i32::try_from(height).unwrap_or(i32::MAX),
    );
    let min = origin.max(IVec2::ZERO);
    let max = IVec2::new(
        origin.x.saturating_add(size.x),
        origin.y.saturating_add(size.y),
    )
    .min(frame_max);
    Bounds { min, max }
}
