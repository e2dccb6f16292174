//! Writes finished frames as PNG images.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use image::{ImageFormat, RgbaImage};
use tile_defence_rendering::{FrameBuffer, PresentationBackend};
use tracing::info;

/// Presentation backend that stores the most recent frame on disk.
#[derive(Debug)]
pub(crate) struct PngWriter {
    path: PathBuf,
}

impl PngWriter {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PresentationBackend for PngWriter {
    fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        let image = RgbaImage::from_raw(frame.width(), frame.height(), frame.as_bytes().to_vec())
            .ok_or_else(|| {
                anyhow!(
                    "frame of {}x{} does not hold a full RGBA buffer",
                    frame.width(),
                    frame.height()
                )
            })?;
        image
            .save_with_format(&self.path, ImageFormat::Png)
            .with_context(|| format!("failed to write frame to {}", self.path.display()))?;
        info!(
            path = %self.path.display(),
            width = frame.width(),
            height = frame.height(),
            "frame_written"
        );
        Ok(())
    }
}
