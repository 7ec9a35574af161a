use crate::foundation::error::{WaveFillError, WaveFillResult};

/// Fixed output dimensions in pixels, set once when the surface is sized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Validate dimensions: both must be positive and fit the rasterizer's
    /// `u16` surface limit.
    pub fn new(width: u32, height: u32) -> WaveFillResult<Self> {
        if width == 0 || height == 0 {
            return Err(WaveFillError::configuration(
                "canvas width and height must be > 0",
            ));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(WaveFillError::configuration(format!(
                "canvas {width}x{height} exceeds the {} pixel surface limit",
                u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    /// Side length of the square the mask is scaled to.
    pub fn mask_side(self) -> u32 {
        self.width.min(self.height)
    }
}

/// Straight (non-premultiplied) RGBA8 color used in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Construct an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel, premultiplied.
    pub r: u8,
    /// Green channel, premultiplied.
    pub g: u8,
    /// Blue channel, premultiplied.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply a straight RGBA8 color.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

impl From<Rgba8> for Rgba8Premul {
    fn from(c: Rgba8) -> Self {
        Self::from_straight_rgba(c.r, c.g, c.b, c.a)
    }
}
