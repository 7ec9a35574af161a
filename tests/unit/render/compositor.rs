use super::*;
use image::{Rgba, RgbaImage};

use crate::geometry::wave::wave_fill_path;

fn canvas() -> Canvas {
    Canvas::new(40, 40).unwrap()
}

/// Mask whose left half is opaque and right half fully transparent.
fn half_mask(side: u32) -> MaskImage {
    let img = RgbaImage::from_fn(side, side, |x, _| {
        if x < side / 2 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    MaskImage::from_image(img).unwrap()
}

fn full_mask(side: u32) -> MaskImage {
    MaskImage::from_image(RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 255]))).unwrap()
}

fn pixel(frame: &FrameRgba, x: u32, y: u32) -> [u8; 4] {
    let idx = ((y * frame.width + x) * 4) as usize;
    frame.data[idx..idx + 4].try_into().unwrap()
}

#[test]
fn frame_has_canvas_dimensions() {
    let canvas = canvas();
    let path = wave_fill_path(canvas, 0.0, 20.0, 10.0, 2.0).unwrap();
    let mut comp = Compositor::new();
    let frame = comp
        .render(canvas, &path, Rgba8::opaque(0x5b, 0xe4, 0xef), &full_mask(40), None)
        .unwrap();
    assert_eq!((frame.width, frame.height), (40, 40));
    assert_eq!(frame.data.len(), 40 * 40 * 4);
}

#[test]
fn wave_shows_only_inside_mask_silhouette() {
    let canvas = canvas();
    // Flat-ish wave resting mid-canvas.
    let path = wave_fill_path(canvas, 0.0, 20.0, 10.0, 1.0).unwrap();
    let mut comp = Compositor::new();
    let frame = comp
        .render(canvas, &path, Rgba8::opaque(255, 0, 0), &half_mask(40), None)
        .unwrap();

    // Below the resting line, left half: wave survives the mask.
    let inside = pixel(&frame, 5, 35);
    assert_eq!(inside[3], 255);
    assert!(inside[0] > 200, "expected red wave, got {inside:?}");

    // Below the resting line, right half: silhouette is transparent there,
    // so the wave is erased.
    assert_eq!(pixel(&frame, 35, 35), [0, 0, 0, 0]);

    // Above the wave, left half: no wave drawn; the mask's own (opaque white)
    // pixels show through.
    assert_eq!(pixel(&frame, 5, 2), [255, 255, 255, 255]);

    // Above the wave, right half: nothing anywhere.
    assert_eq!(pixel(&frame, 35, 2), [0, 0, 0, 0]);
}

#[test]
fn mask_does_not_degrade_across_frames() {
    let canvas = canvas();
    let path = wave_fill_path(canvas, 0.0, 20.0, 10.0, 1.0).unwrap();
    let mut comp = Compositor::new();
    let first = comp
        .render(canvas, &path, Rgba8::opaque(255, 0, 0), &half_mask(40), None)
        .unwrap();
    for _ in 0..20 {
        let again = comp
            .render(canvas, &path, Rgba8::opaque(255, 0, 0), &half_mask(40), None)
            .unwrap();
        assert_eq!(again.data, first.data);
    }
}

#[test]
fn switching_masks_on_the_same_canvas_rebuilds_the_layer() {
    let canvas = canvas();
    let path = wave_fill_path(canvas, 0.0, 20.0, 10.0, 1.0).unwrap();
    let mut comp = Compositor::new();
    let red = Rgba8::opaque(255, 0, 0);

    let opaque = comp
        .render(canvas, &path, red, &full_mask(40), None)
        .unwrap();
    assert_eq!(pixel(&opaque, 5, 35)[3], 255);

    // A fully transparent mask on the same canvas must erase the wave, not
    // reuse the previous mask's cached layer.
    let clear =
        MaskImage::from_image(RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 0]))).unwrap();
    let erased = comp.render(canvas, &path, red, &clear, None).unwrap();
    assert_eq!(pixel(&erased, 5, 35), [0, 0, 0, 0]);
}

#[test]
fn rising_level_fills_more_of_the_silhouette() {
    let canvas = canvas();
    let mut comp = Compositor::new();
    let count_filled = |level: f64, comp: &mut Compositor| -> usize {
        let path = wave_fill_path(canvas, 0.0, level, 10.0, 1.0).unwrap();
        let frame = comp
            .render(canvas, &path, Rgba8::opaque(255, 0, 0), &full_mask(40), None)
            .unwrap();
        frame
            .data
            .chunks_exact(4)
            .filter(|px| px[0] > 200 && px[3] == 255)
            .count()
    };
    let low = count_filled(35.0, &mut comp);
    let high = count_filled(5.0, &mut comp);
    assert!(high > low, "high fill {high} should exceed low fill {low}");
}
