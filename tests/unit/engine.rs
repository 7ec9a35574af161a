use super::*;
use image::{Rgba, RgbaImage};

fn engine() -> WaveEngine {
    let canvas = Canvas::new(64, 64).unwrap();
    let mask = MaskImage::from_image(RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]))).unwrap();
    WaveEngine::with_mask(canvas, mask).unwrap()
}

#[test]
fn construction_requires_a_decodable_mask() {
    let canvas = Canvas::new(64, 64).unwrap();
    assert!(matches!(
        WaveEngine::new(canvas, b"garbage"),
        Err(WaveFillError::Configuration(_))
    ));
}

#[test]
fn defaults_match_the_classic_appearance() {
    let cfg = engine().config();
    assert_eq!(cfg.wave.half_width, 100.0);
    assert_eq!(cfg.wave.amplitude, 20.0);
    assert_eq!(cfg.wave.speed, 30);
    assert_eq!(cfg.max_progress, 100);
    assert_eq!(cfg.text.size_px, 41);
    assert!(cfg.font.is_none());
}

#[test]
fn setters_validate_eagerly() {
    let e = engine();
    assert!(e.set_max_progress(0).is_err());
    assert!(e.set_wave_speed(0).is_err());
    assert!(e.set_text_style(Rgba8::opaque(0, 0, 0), 0).is_err());
    assert!(e.set_wave(-1.0, 200.0).is_err());
    assert!(e.set_wave(10.0, 0.0).is_err());
    assert!(e.set_wave(10.0, f64::NAN).is_err());
    assert!(e.set_label_font(Vec::new()).is_err());

    e.set_wave(10.0, 80.0).unwrap();
    assert_eq!(e.config().wave.half_width, 40.0);
    assert_eq!(e.config().wave.amplitude, 10.0);
}

#[test]
fn set_progress_is_idempotent_for_target_level() {
    let e = engine();
    e.set_progress(50, "50%");
    e.render_frame().unwrap();
    let first = e.state().target_level;
    e.set_progress(50, "50%");
    e.render_frame().unwrap();
    assert_eq!(e.state().target_level, first);
    assert_eq!(first, 32.0);
}

#[test]
fn render_frame_advances_state_and_produces_pixels() {
    let e = engine();
    e.set_progress(50, "");
    let frame = e.render_frame().unwrap();
    assert_eq!((frame.width, frame.height), (64, 64));

    let s1 = e.state();
    e.render_frame().unwrap();
    let s2 = e.state();
    assert!(s2.phase > s1.phase);
    assert!(s2.current_level < s1.current_level);
}

#[test]
fn rejected_max_progress_leaves_engine_usable() {
    let e = engine();
    assert!(e.set_max_progress(0).is_err());
    // The invalid value was never stored; rendering continues.
    assert!(e.render_frame().is_ok());
    assert_eq!(e.config().max_progress, 100);
}

#[test]
fn activate_streams_frames_and_deactivate_stops() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    let mut e = engine();
    let frames = Arc::new(AtomicU32::new(0));
    let f = frames.clone();
    e.activate(move |frame| {
        assert_eq!(frame.data.len(), 64 * 64 * 4);
        f.fetch_add(1, Ordering::SeqCst);
    });
    assert!(e.is_active());

    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
    while frames.load(Ordering::SeqCst) < 2 && std::time::Instant::now() < deadline {
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
    assert!(frames.load(Ordering::SeqCst) >= 2);

    e.deactivate();
    assert!(!e.is_active());
    let after = frames.load(Ordering::SeqCst);
    std::thread::sleep(std::time::Duration::from_millis(30));
    assert_eq!(frames.load(Ordering::SeqCst), after);
}

#[test]
fn activate_twice_is_a_noop() {
    let mut e = engine();
    e.activate(|_| {});
    e.activate(|_| {});
    assert!(e.is_active());
    e.deactivate();
    e.deactivate();
}

#[test]
fn setters_work_while_running() {
    let mut e = engine();
    e.activate(|_| {});
    e.set_progress(70, "70%");
    e.set_wave_color(Rgba8::opaque(10, 20, 30));
    e.set_wave_speed(10).unwrap();
    e.deactivate();
    assert_eq!(e.config().progress, 70);
    assert_eq!(e.config().wave.speed, 10);
}
