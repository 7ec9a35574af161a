use kurbo::BezPath;

use crate::foundation::core::Canvas;
use crate::foundation::error::{WaveFillError, WaveFillResult};

/// Full wave period in pixels: two humps spanning four half-widths.
pub fn wave_period(half_width: f64) -> f64 {
    half_width * 4.0
}

/// Number of repeated hump units needed to cover `width`, plus one extra
/// period of margin for phase scrolling.
pub fn wave_count(width: u32, half_width: f64) -> usize {
    (f64::from(width) / wave_period(half_width)).floor() as usize + 1
}

/// Build the closed path of the wave-filled region: the undulating boundary
/// at `level`, dropped to the bottom edge of the canvas and closed.
///
/// The boundary starts at `x = -phase` and emits `wave_count * 3` hump units,
/// each made of two quadratic curves (crest at `level - amplitude`, trough at
/// `level + amplitude`). Over-generation past the right edge guarantees that
/// scrolling never exposes a horizontal gap for any `phase` in
/// `[0, 4 * half_width)`.
pub fn wave_fill_path(
    canvas: Canvas,
    phase: f64,
    level: f64,
    half_width: f64,
    amplitude: f64,
) -> WaveFillResult<BezPath> {
    if !half_width.is_finite() || half_width <= 0.0 {
        return Err(WaveFillError::invalid_parameter(format!(
            "wave half-width must be finite and > 0, got {half_width}"
        )));
    }
    if !amplitude.is_finite() || amplitude < 0.0 {
        return Err(WaveFillError::invalid_parameter(format!(
            "wave amplitude must be finite and >= 0, got {amplitude}"
        )));
    }

    let width = f64::from(canvas.width);
    let height = f64::from(canvas.height);
    let units = wave_count(canvas.width, half_width) * 3;

    let mut path = BezPath::new();
    path.move_to((-phase, level));
    let mut m = 0.0;
    for _ in 0..units {
        path.quad_to(
            (half_width * (m + 1.0) - phase, level - amplitude),
            (half_width * (m + 2.0) - phase, level),
        );
        path.quad_to(
            (half_width * (m + 3.0) - phase, level + amplitude),
            (half_width * (m + 4.0) - phase, level),
        );
        m += 4.0;
    }
    path.line_to((width, height));
    path.line_to((0.0, height));
    path.close_path();
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/wave.rs"]
mod tests;
