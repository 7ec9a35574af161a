use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::animation::level::AnimationState;
use crate::assets::mask::MaskImage;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{WaveFillError, WaveFillResult};
use crate::geometry::wave::wave_fill_path;
use crate::render::compositor::{Compositor, FrameRgba, LabelSpec};
use crate::scheduler::AnimationScheduler;

/// Delay between animation ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Wave appearance parameters, immutable per configuration change.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WaveParams {
    /// Half-wavelength in pixels, > 0.
    pub half_width: f64,
    /// Wave height in pixels, >= 0.
    pub amplitude: f64,
    /// Integer divisor controlling the phase increment per tick, > 0.
    pub speed: u32,
    /// Wave fill color.
    pub color: Rgba8,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            half_width: 100.0,
            amplitude: 20.0,
            speed: 30,
            color: Rgba8::opaque(0x5b, 0xe4, 0xef),
        }
    }
}

/// Label styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    /// Straight text color.
    pub color: Rgba8,
    /// Font size in pixels, > 0.
    pub size_px: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Rgba8::opaque(255, 255, 255),
            size_px: 41,
        }
    }
}

/// Consistent view of the configuration, cloned once at the start of each
/// tick. A frame may render slightly stale values; the next tick corrects it.
#[derive(Clone, Debug)]
pub struct ConfigSnapshot {
    /// Wave appearance parameters.
    pub wave: WaveParams,
    /// Label styling.
    pub text: TextStyle,
    /// Current progress value.
    pub progress: u32,
    /// Progress value that counts as full, > 0.
    pub max_progress: u32,
    /// Label text drawn centered on the canvas.
    pub label: String,
    /// Font bytes for the label, if configured.
    pub font: Option<Arc<Vec<u8>>>,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            wave: WaveParams::default(),
            text: TextStyle::default(),
            progress: 0,
            max_progress: 100,
            label: String::new(),
            font: None,
        }
    }
}

struct EngineInner {
    canvas: Canvas,
    mask: MaskImage,
    config: Mutex<ConfigSnapshot>,
    state: Mutex<AnimationState>,
    compositor: Mutex<Compositor>,
}

/// The liquid-progress engine: owns the mask, the animation state and the
/// scheduler, and exposes the configuration surface.
///
/// Setters may be called from any thread at any time, including while the
/// animation is running; the render tick reads a [`ConfigSnapshot`] at tick
/// boundaries.
pub struct WaveEngine {
    inner: Arc<EngineInner>,
    scheduler: Option<AnimationScheduler>,
}

impl WaveEngine {
    /// Construct an engine for a fixed canvas with a mandatory silhouette
    /// mask. Missing or undecodable mask bytes fail with
    /// [`WaveFillError::Configuration`]: there is no valid appearance
    /// without one.
    pub fn new(canvas: Canvas, mask_bytes: &[u8]) -> WaveFillResult<Self> {
        Self::with_mask(canvas, MaskImage::from_bytes(mask_bytes)?)
    }

    /// Construct an engine from an already-decoded mask.
    pub fn with_mask(canvas: Canvas, mask: MaskImage) -> WaveFillResult<Self> {
        Ok(Self {
            inner: Arc::new(EngineInner {
                canvas,
                mask,
                config: Mutex::new(ConfigSnapshot::default()),
                state: Mutex::new(AnimationState::at_rest(canvas)),
                compositor: Mutex::new(Compositor::new()),
            }),
            scheduler: None,
        })
    }

    /// Canvas dimensions this engine renders at.
    pub fn canvas(&self) -> Canvas {
        self.inner.canvas
    }

    /// Update progress and the label shown over the fill. Never fails;
    /// values above the configured maximum are not clamped.
    pub fn set_progress(&self, progress: u32, label: impl Into<String>) {
        let mut cfg = lock(&self.inner.config);
        cfg.progress = progress;
        cfg.label = label.into();
    }

    /// Set the progress value that counts as full.
    pub fn set_max_progress(&self, max_progress: u32) -> WaveFillResult<()> {
        if max_progress == 0 {
            return Err(WaveFillError::invalid_parameter("max progress must be > 0"));
        }
        lock(&self.inner.config).max_progress = max_progress;
        Ok(())
    }

    /// Set label color and font size.
    pub fn set_text_style(&self, color: Rgba8, size_px: u32) -> WaveFillResult<()> {
        if size_px == 0 {
            return Err(WaveFillError::invalid_parameter("text size must be > 0"));
        }
        let mut cfg = lock(&self.inner.config);
        cfg.text = TextStyle { color, size_px };
        Ok(())
    }

    /// Set wave height and wavelength (full period is `2 * wavelength`).
    pub fn set_wave(&self, amplitude: f64, wavelength: f64) -> WaveFillResult<()> {
        if !amplitude.is_finite() || amplitude < 0.0 {
            return Err(WaveFillError::invalid_parameter(format!(
                "wave amplitude must be finite and >= 0, got {amplitude}"
            )));
        }
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(WaveFillError::invalid_parameter(format!(
                "wavelength must be finite and > 0, got {wavelength}"
            )));
        }
        let mut cfg = lock(&self.inner.config);
        cfg.wave.amplitude = amplitude;
        cfg.wave.half_width = wavelength / 2.0;
        Ok(())
    }

    /// Set the wave fill color.
    pub fn set_wave_color(&self, color: Rgba8) {
        lock(&self.inner.config).wave.color = color;
    }

    /// Set the phase-increment divisor: larger values scroll slower.
    pub fn set_wave_speed(&self, divisor: u32) -> WaveFillResult<()> {
        if divisor == 0 {
            return Err(WaveFillError::invalid_parameter("wave speed must be > 0"));
        }
        lock(&self.inner.config).wave.speed = divisor;
        Ok(())
    }

    /// Provide the font backing the centered label. Until a font is set the
    /// label pass is skipped.
    pub fn set_label_font(&self, bytes: Vec<u8>) -> WaveFillResult<()> {
        if bytes.is_empty() {
            return Err(WaveFillError::invalid_parameter("font bytes are empty"));
        }
        lock(&self.inner.config).font = Some(Arc::new(bytes));
        Ok(())
    }

    /// Whether the animation loop is currently running.
    pub fn is_active(&self) -> bool {
        self.scheduler.is_some()
    }

    /// Start the animation loop: an immediate tick, then one every
    /// [`TICK_INTERVAL`]. Each successful frame is handed to `present`;
    /// failed frames are logged and skipped, keeping whatever the consumer
    /// last displayed. No-op when already running.
    pub fn activate(&mut self, mut present: impl FnMut(FrameRgba) + Send + 'static) {
        if self.scheduler.is_some() {
            return;
        }
        let inner = Arc::clone(&self.inner);
        self.scheduler = Some(AnimationScheduler::spawn(TICK_INTERVAL, move || {
            match render_frame_inner(&inner) {
                Ok(frame) => present(frame),
                Err(err) => tracing::warn!(%err, "frame skipped"),
            }
            true
        }));
    }

    /// Stop the animation loop. Returns once no further tick can fire;
    /// pending ticks observe cancellation and no-op. No-op when inactive.
    pub fn deactivate(&mut self) {
        if let Some(mut scheduler) = self.scheduler.take() {
            scheduler.cancel();
        }
    }

    /// Advance the animation one tick and render a frame, without the
    /// scheduler. This is the same path the loop runs.
    pub fn render_frame(&self) -> WaveFillResult<FrameRgba> {
        render_frame_inner(&self.inner)
    }

    /// Current animation state (phase and levels).
    pub fn state(&self) -> AnimationState {
        *lock(&self.inner.state)
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> ConfigSnapshot {
        lock(&self.inner.config).clone()
    }
}

impl Drop for WaveEngine {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[tracing::instrument(skip(inner), level = "trace")]
fn render_frame_inner(inner: &EngineInner) -> WaveFillResult<FrameRgba> {
    let snap = lock(&inner.config).clone();

    let (phase, level) = {
        let mut state = lock(&inner.state);
        state.advance(
            inner.canvas,
            snap.wave.half_width,
            snap.wave.speed,
            snap.progress,
            snap.max_progress,
        )?;
        (state.phase, state.current_level)
    };

    let path = wave_fill_path(
        inner.canvas,
        phase,
        level,
        snap.wave.half_width,
        snap.wave.amplitude,
    )?;

    let label = snap.font.as_ref().map(|font| LabelSpec {
        text: &snap.label,
        size_px: snap.text.size_px,
        color: snap.text.color,
        font,
    });

    lock(&inner.compositor).render(inner.canvas, &path, snap.wave.color, &inner.mask, label)
}

/// Poisoning is recovered by taking the inner value: a frame rendered from a
/// half-written config is corrected on the next tick.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
