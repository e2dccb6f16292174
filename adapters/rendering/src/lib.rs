#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Software rendering for Tile Defence.
//!
//! Frames are composed into an RGBA8 [`FrameBuffer`] owned by the
//! [`Renderer`]: the visible window of the tile grid first, then every enemy
//! on top in pool order. Presentation layers receive the finished bytes
//! through [`PresentationBackend`].

mod frame;
mod renderer;
mod sprites;

pub use frame::FrameBuffer;
pub use renderer::Renderer;
pub use sprites::{Sprite, SpriteAtlas, SpriteSheet};

use anyhow::Result as AnyResult;
use thiserror::Error;

/// RGBA color with byte channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel; zero marks a transparent sprite pixel.
    pub alpha: u8,
}

impl Color {
    /// Creates a new color from byte channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Channels in buffer order.
    #[must_use]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

fn lighten_channel(channel: u8, amount: f32) -> u8 {
    let channel = f32::from(channel);
    (channel + (255.0 - channel) * amount).round() as u8
}

/// Presentation layer that displays finished frames.
pub trait PresentationBackend {
    /// Hands one finished frame to the presentation layer.
    fn present(&mut self, frame: &FrameBuffer) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering resources.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderingError {
    /// Sprite pixel data does not match its declared dimensions.
    #[error("sprite of {width}x{height} requires {expected} bytes, received {actual}")]
    InvalidSpriteData {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
        /// Byte count implied by the dimensions.
        expected: usize,
        /// Byte count supplied.
        actual: usize,
    },
    /// A frame buffer must cover at least one pixel.
    #[error("frame buffer dimensions must be positive (received {width}x{height})")]
    EmptyFrame {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}
