use crate::foundation::core::Canvas;
use crate::foundation::error::{WaveFillError, WaveFillResult};

/// Resting line of the wave in surface-space y for the given progress.
///
/// The convention is inverted: zero progress rests at the bottom of the
/// canvas, full progress at the top ("fill rises as progress increases").
/// Progress above `max_progress` is not clamped; the target then goes
/// negative and the wave rests above the top edge.
pub fn target_level(height: u32, progress: u32, max_progress: u32) -> WaveFillResult<f64> {
    if max_progress == 0 {
        return Err(WaveFillError::invalid_parameter("max progress must be > 0"));
    }
    let max = f64::from(max_progress);
    Ok(f64::from(height) * (max - f64::from(progress)) / max)
}

/// Per-tick animation state: wave scroll offset and fill level.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationState {
    /// Horizontal offset into the wave pattern, wraps in `[0, 4*half_width)`.
    pub phase: f64,
    /// Current vertical position of the wave's resting line.
    pub current_level: f64,
    /// Level derived from progress that `current_level` decays toward.
    pub target_level: f64,
}

impl AnimationState {
    /// Initial state: level resting at the bottom edge, phase zero.
    pub fn at_rest(canvas: Canvas) -> Self {
        let bottom = f64::from(canvas.height);
        Self {
            phase: 0.0,
            current_level: bottom,
            target_level: bottom,
        }
    }

    /// Advance one tick: recompute the target from progress, decay the level
    /// toward it, and scroll the phase.
    ///
    /// The easing is one-directional: only a level above the target decays
    /// (`current -= (current - target) / 10`). A target above the current
    /// level is left alone. The decay is geometric, so the level approaches
    /// but never overshoots the target. Phase advances every tick regardless
    /// of level convergence.
    pub fn advance(
        &mut self,
        canvas: Canvas,
        half_width: f64,
        speed: u32,
        progress: u32,
        max_progress: u32,
    ) -> WaveFillResult<()> {
        if speed == 0 {
            return Err(WaveFillError::invalid_parameter("wave speed must be > 0"));
        }
        if !half_width.is_finite() || half_width <= 0.0 {
            return Err(WaveFillError::invalid_parameter(format!(
                "wave half-width must be finite and > 0, got {half_width}"
            )));
        }

        self.target_level = target_level(canvas.height, progress, max_progress)?;
        if self.current_level > self.target_level {
            self.current_level -= (self.current_level - self.target_level) / 10.0;
        }

        let period = half_width * 4.0;
        self.phase = (self.phase + half_width / f64::from(speed)) % period;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/level.rs"]
mod tests;
