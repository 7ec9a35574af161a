use std::sync::Arc;

use kurbo::PathEl;

use crate::assets::mask::MaskImage;
use crate::foundation::core::{Canvas, Rgba8, Rgba8Premul};
use crate::foundation::error::{WaveFillError, WaveFillResult};
use crate::render::composite::{dst_atop_in_place, over_in_place};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};

/// One finished frame: premultiplied RGBA8 pixels, row-major.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl FrameRgba {
    /// Premultiplied pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let px = &self.data[idx..idx + 4];
        Some(Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }
}

/// Label styling and content for one frame.
#[derive(Clone, Debug)]
pub struct LabelSpec<'a> {
    /// Text to draw centered on the canvas.
    pub text: &'a str,
    /// Font size in pixels.
    pub size_px: u32,
    /// Straight text color.
    pub color: Rgba8,
    /// Raw font bytes backing the label glyphs.
    pub font: &'a Arc<Vec<u8>>,
}

struct PreparedLabel {
    layout: parley::Layout<TextBrushRgba8>,
    font: vello_cpu::peniko::FontData,
    key: LabelKey,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct LabelKey {
    text: String,
    size_px: u32,
    color: Rgba8,
    font_ptr: usize,
}

struct MaskLayer {
    canvas: Canvas,
    source: (usize, u32, u32),
    data: Vec<u8>,
}

/// Produces finished frames: fills the wave path, gates it through the mask
/// silhouette and overlays the centered label.
///
/// The vello_cpu render context and the shaped label are reused across frames;
/// the scaled mask layer is cached per canvas and mask source so the mask is
/// resampled at most once per size.
pub struct Compositor {
    ctx: Option<vello_cpu::RenderContext>,
    text_engine: TextLayoutEngine,
    mask_layer: Option<MaskLayer>,
    label: Option<PreparedLabel>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    /// Construct a compositor with empty caches.
    pub fn new() -> Self {
        Self {
            ctx: None,
            text_engine: TextLayoutEngine::new(),
            mask_layer: None,
            label: None,
        }
    }

    /// Render one frame.
    ///
    /// Failures here are per-frame and recoverable: the caller skips the
    /// frame and keeps whatever was last presented.
    pub fn render(
        &mut self,
        canvas: Canvas,
        path: &kurbo::BezPath,
        wave_color: Rgba8,
        mask: &MaskImage,
        label: Option<LabelSpec<'_>>,
    ) -> WaveFillResult<FrameRgba> {
        let (w, h) = surface_dims(canvas)?;

        // Liquid layer: the wave path filled over a transparent background.
        let mut frame = self.with_ctx_mut(w, h, |_, ctx| {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                wave_color.r,
                wave_color.g,
                wave_color.b,
                wave_color.a,
            ));
            ctx.fill_path(&bezpath_to_cpu(path));
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap.data_as_u8_slice().to_vec())
        })?;

        // Gate the liquid through the silhouette.
        let source = mask.source_key();
        if self
            .mask_layer
            .as_ref()
            .is_none_or(|cached| cached.canvas != canvas || cached.source != source)
        {
            self.mask_layer = Some(MaskLayer {
                canvas,
                source,
                data: mask.layer_for(canvas),
            });
        }
        let mask_layer = self
            .mask_layer
            .as_ref()
            .ok_or_else(|| WaveFillError::render("mask layer missing"))?;
        dst_atop_in_place(&mut frame, &mask_layer.data)?;

        // Centered label on top.
        if let Some(spec) = label
            && !spec.text.is_empty()
        {
            let text_layer = self.render_label(canvas, w, h, &spec)?;
            over_in_place(&mut frame, &text_layer)?;
        }

        Ok(FrameRgba {
            width: canvas.width,
            height: canvas.height,
            data: frame,
        })
    }

    fn render_label(
        &mut self,
        canvas: Canvas,
        w: u16,
        h: u16,
        spec: &LabelSpec<'_>,
    ) -> WaveFillResult<Vec<u8>> {
        self.ensure_label(spec)?;
        let label = self
            .label
            .as_ref()
            .ok_or_else(|| WaveFillError::render("label cache missing"))?;

        let tx = (f64::from(canvas.width) - f64::from(label.layout.width())) / 2.0;
        let ty = (f64::from(canvas.height) - f64::from(label.layout.height())) / 2.0;

        self.with_ctx_mut(w, h, |this, ctx| {
            let label = this
                .label
                .as_ref()
                .ok_or_else(|| WaveFillError::render("label cache missing"))?;
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((tx, ty)));
            for line in label.layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&label.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap.data_as_u8_slice().to_vec())
        })
    }

    fn ensure_label(&mut self, spec: &LabelSpec<'_>) -> WaveFillResult<()> {
        let key = LabelKey {
            text: spec.text.to_string(),
            size_px: spec.size_px,
            color: spec.color,
            font_ptr: Arc::as_ptr(spec.font) as usize,
        };
        if self.label.as_ref().is_some_and(|l| l.key == key) {
            return Ok(());
        }

        let brush = TextBrushRgba8 {
            r: spec.color.r,
            g: spec.color.g,
            b: spec.color.b,
            a: spec.color.a,
        };
        let layout =
            self.text_engine
                .layout_plain(spec.text, spec.font, spec.size_px as f32, brush)?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(spec.font.as_ref().clone()),
            0,
        );
        self.label = Some(PreparedLabel { layout, font, key });
        Ok(())
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> WaveFillResult<R>,
    ) -> WaveFillResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }
}

fn surface_dims(canvas: Canvas) -> WaveFillResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| WaveFillError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| WaveFillError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
