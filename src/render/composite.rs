//! Premultiplied RGBA8 pixel compositing primitives.

use crate::foundation::error::{WaveFillError, WaveFillResult};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over: `src` composited onto `dst`.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Porter-Duff destination-atop: `dst` survives only where `src` is opaque,
/// and `src` shows through where `dst` is absent.
///
/// `out = dst * src_a + src * (1 - dst_a)`. With the wave layer as `dst` and
/// the mask as `src`, this gates the wave to the mask's silhouette while the
/// mask's own pixels show where the wave has not risen.
pub fn dst_atop(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    let inv_da = 255u16 - u16::from(dst[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let kept = mul_div255(u16::from(dst[i]), sa);
        let shown = mul_div255(u16::from(src[i]), inv_da);
        out[i] = kept.saturating_add(shown);
    }
    out
}

/// Source-over an entire RGBA8 buffer in place.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> WaveFillResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(WaveFillError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Destination-atop an entire RGBA8 buffer in place (`dst` is rewritten).
pub fn dst_atop_in_place(dst: &mut [u8], src: &[u8]) -> WaveFillResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(WaveFillError::render(
            "dst_atop_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = dst_atop([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
