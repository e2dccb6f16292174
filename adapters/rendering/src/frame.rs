use glam::IVec2;

use crate::{Color, RenderingError};

const BYTES_PER_PIXEL: usize = 4;

/// Row-major RGBA8 pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Allocates a transparent frame of the provided size.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderingError> {
        if width == 0 || height == 0 {
            return Err(RenderingError::EmptyFrame { width, height });
        }
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
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

    /// Fills every pixel with the provided color.
    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba();
        for chunk in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&rgba);
        }
    }

    /// Writes a pixel; positions outside the frame are clipped.
    pub fn put(&mut self, position: IVec2, rgba: [u8; 4]) {
        if let Some(offset) = self.offset(position) {
            self.pixels[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&rgba);
        }
    }

    /// Reads the pixel at the provided position.
    #[must_use]
    pub fn pixel(&self, position: IVec2) -> Option<[u8; 4]> {
        let offset = self.offset(position)?;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    /// Raw RGBA bytes in row-major order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    fn offset(&self, position: IVec2) -> Option<usize> {
        let x = u32::try_from(position.x).ok()?;
        let y = u32::try_from(position.y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            FrameBuffer::new(0, 10),
            Err(RenderingError::EmptyFrame {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn fill_covers_every_pixel() {
        let mut frame = FrameBuffer::new(3, 2).expect("frame");
        frame.fill(Color::from_rgb_u8(1, 2, 3));
        assert_eq!(frame.as_bytes().len(), 24);
        assert!(frame
            .as_bytes()
            .chunks_exact(4)
            .all(|chunk| chunk == [1, 2, 3, 255]));
    }

    #[test]
    fn put_clips_outside_positions() {
        let mut frame = FrameBuffer::new(2, 2).expect("frame");
        frame.put(IVec2::new(-1, 0), [9; 4]);
        frame.put(IVec2::new(2, 0), [9; 4]);
        frame.put(IVec2::new(0, 2), [9; 4]);
        assert!(frame.as_bytes().iter().all(|byte| *byte == 0));

        frame.put(IVec2::new(1, 1), [9; 4]);
        assert_eq!(frame.pixel(IVec2::new(1, 1)), Some([9; 4]));
        assert_eq!(&frame.as_bytes()[12..16], &[9; 4]);
    }
}
