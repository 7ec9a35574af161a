use image::RgbaImage;

use crate::foundation::core::Canvas;
use crate::foundation::error::{WaveFillError, WaveFillResult};

/// Silhouette mask: an alpha image constraining where the wave is visible.
///
/// The decoded source is kept pristine; every rescale starts from it, so the
/// mask never degrades across repeated frames.
#[derive(Clone, Debug)]
pub struct MaskImage {
    source: RgbaImage,
}

impl MaskImage {
    /// Decode an encoded image (PNG, JPEG, ...) into a mask.
    ///
    /// An undecodable or empty image is a fatal configuration error: there is
    /// no valid appearance without a silhouette.
    pub fn from_bytes(bytes: &[u8]) -> WaveFillResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| WaveFillError::configuration(format!("failed to decode mask: {e}")))?;
        Self::from_image(dyn_img.to_rgba8())
    }

    /// Wrap an already-decoded RGBA image as a mask.
    pub fn from_image(source: RgbaImage) -> WaveFillResult<Self> {
        if source.width() == 0 || source.height() == 0 {
            return Err(WaveFillError::configuration("mask image is empty"));
        }
        Ok(Self { source })
    }

    /// Source width in pixels.
    pub fn width(&self) -> u32 {
        self.source.width()
    }

    /// Source height in pixels.
    pub fn height(&self) -> u32 {
        self.source.height()
    }

    /// Identity of the decoded source buffer, used to invalidate cached
    /// scaled layers when a different mask is rendered on the same canvas.
    pub(crate) fn source_key(&self) -> (usize, u32, u32) {
        (
            self.source.as_raw().as_ptr() as usize,
            self.source.width(),
            self.source.height(),
        )
    }

    /// Build a canvas-sized premultiplied RGBA8 layer with the mask scaled to
    /// a `min(width, height)` square at the origin, transparent elsewhere.
    pub(crate) fn layer_for(&self, canvas: Canvas) -> Vec<u8> {
        let side = canvas.mask_side();
        let scaled = if self.source.width() == side && self.source.height() == side {
            self.source.clone()
        } else {
            image::imageops::resize(&self.source, side, side, image::imageops::FilterType::Triangle)
        };

        let w = canvas.width as usize;
        let h = canvas.height as usize;
        let mut layer = vec![0u8; w * h * 4];
        for y in 0..side.min(canvas.height) as usize {
            let src_row = &scaled.as_raw()[y * side as usize * 4..][..side as usize * 4];
            let dst_row = &mut layer[y * w * 4..][..side as usize * 4];
            dst_row.copy_from_slice(src_row);
        }
        premultiply_rgba8_in_place(&mut layer);
        layer
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/mask.rs"]
mod tests;
