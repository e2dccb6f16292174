use std::collections::HashMap;

use tile_defence_core::{TileMetrics, TileVisual};

use crate::{Color, RenderingError};

/// RGBA8 pixel data for a single tile visual.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Sprite {
    /// Wraps raw RGBA8 data, rejecting buffers that do not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, RenderingError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(RenderingError::InvalidSpriteData {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Flat-colour sprite with a one pixel highlighted border.
    #[must_use]
    pub fn bordered(width: u32, height: u32, fill: Color) -> Self {
        let border = fill.lighten(0.35).to_rgba();
        let fill = fill.to_rgba();
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let edge = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
                rgba.extend_from_slice(if edge { &border } else { &fill });
            }
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at the provided sprite-local coordinates.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.rgba[offset..offset + 4]);
        Some(rgba)
    }
}

/// Maps tile visuals to pixel data.
pub trait SpriteSheet {
    /// Sprite registered for the visual, if any.
    fn sprite(&self, visual: TileVisual) -> Option<&Sprite>;
}

/// In-memory sprite sheet keyed by visual identifier.
#[derive(Clone, Debug, Default)]
pub struct SpriteAtlas {
    sprites: HashMap<TileVisual, Sprite>,
}

impl SpriteAtlas {
    /// Creates an empty atlas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds bordered flat-colour sprites sized to the tile footprint.
    #[must_use]
    pub fn from_palette(metrics: TileMetrics, palette: &[(TileVisual, Color)]) -> Self {
        let mut atlas = Self::new();
        for (visual, color) in palette {
            let _ = atlas.insert(
                *visual,
                Sprite::bordered(metrics.width_px(), metrics.height_px(), *color),
            );
        }
        atlas
    }

    /// Registers a sprite, returning the one it replaced.
    pub fn insert(&mut self, visual: TileVisual, sprite: Sprite) -> Option<Sprite> {
        self.sprites.insert(visual, sprite)
    }

    /// Number of registered sprites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Whether the atlas holds no sprites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl SpriteSheet for SpriteAtlas {
    fn sprite(&self, visual: TileVisual) -> Option<&Sprite> {
        self.sprites.get(&visual)
    }
}
