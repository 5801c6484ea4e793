use std::collections::HashMap;
use std::sync::Arc;

use vello_cpu::kurbo::Shape;

use crate::assets::decode::BaseImage;
use crate::assets::fonts::{FALLBACK_ADVANCE_EM, FontBook, TextLayoutEngine};
use crate::compile::plan::{
    RenderPlan, SelectionBoxOp, Shadow, TextFillOp, TextRun, TextStrokeOp,
};
use crate::foundation::color::Color;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::layers::model::FontFamily;
use crate::render::backend::FrameRGBA;
use crate::render::blur::blur_rgba8_premul;
use crate::render::composite::{Region, extract_region, over_in_place, over_region_in_place};
use crate::render::passes::PassBackend;

/// CPU raster backend powered by `vello_cpu`.
///
/// Each op renders into a fresh transparent scratch pixmap which is then composited with
/// premultiplied `over` onto the frame surface.
pub struct CpuBackend {
    fonts: FontBook,
    layout: TextLayoutEngine,
    font_data: HashMap<FontFamily, vello_cpu::peniko::FontData>,
    shaped: HashMap<ShapeKey, Arc<ShapedText>>,
    surface: Option<CpuSurface>,
    warned_missing_fonts: bool,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ShapeKey {
    text: String,
    font: FontFamily,
    size_bits: u32,
}

struct ShapedText {
    font: vello_cpu::peniko::FontData,
    font_size: f32,
    glyphs: Vec<vello_cpu::Glyph>,
    width: f64,
    height: f64,
}

enum GlyphPaint {
    Fill,
    Stroke(f64),
}

impl CpuBackend {
    pub fn new(fonts: FontBook) -> Self {
        Self {
            fonts,
            layout: TextLayoutEngine::new(),
            font_data: HashMap::new(),
            shaped: HashMap::new(),
            surface: None,
            warned_missing_fonts: false,
        }
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    fn surface(&self) -> ForgeResult<&CpuSurface> {
        self.surface
            .as_ref()
            .ok_or_else(|| ForgeError::render("frame surface was not initialized"))
    }

    fn surface_mut(&mut self) -> ForgeResult<&mut CpuSurface> {
        self.surface
            .as_mut()
            .ok_or_else(|| ForgeError::render("frame surface was not initialized"))
    }

    /// Shape `run` with its font, or `None` when the book has no face at all.
    fn shape(&mut self, run: &TextRun) -> ForgeResult<Option<Arc<ShapedText>>> {
        let key = ShapeKey {
            text: run.text.clone(),
            font: run.font,
            size_bits: run.size_px.to_bits(),
        };
        if let Some(shaped) = self.shaped.get(&key) {
            return Ok(Some(shaped.clone()));
        }

        let Some(face) = self.fonts.face(run.font) else {
            if !self.warned_missing_fonts {
                tracing::warn!("no fonts loaded; text layers are measured but not drawn");
                self.warned_missing_fonts = true;
            }
            return Ok(None);
        };

        let layout = self.layout.layout_line(&run.text, &face, run.size_px)?;
        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                glyphs.extend(glyph_run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
        }

        let font = self
            .font_data
            .entry(face.family)
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
                    0,
                )
            })
            .clone();

        let shaped = Arc::new(ShapedText {
            font,
            font_size: run.size_px,
            glyphs,
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
        });
        self.shaped.insert(key, shaped.clone());
        Ok(Some(shaped))
    }

    /// Advance width of `run`, estimated when no font is available.
    pub(crate) fn text_width(&mut self, run: &TextRun) -> ForgeResult<f64> {
        Ok(match self.shape(run)? {
            Some(shaped) => shaped.width,
            None => estimate_width(run),
        })
    }

    fn render_scratch(
        &self,
        draw: impl FnOnce(&mut vello_cpu::RenderContext),
    ) -> ForgeResult<vello_cpu::Pixmap> {
        let s = self.surface()?;
        let mut ctx = vello_cpu::RenderContext::new(s.width, s.height);
        draw(&mut ctx);
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(s.width, s.height);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap)
    }

    fn render_glyphs(
        &self,
        shaped: &ShapedText,
        origin: (f64, f64),
        color: Color,
        paint: &GlyphPaint,
    ) -> ForgeResult<vello_cpu::Pixmap> {
        self.render_scratch(|ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::translate(origin));
            ctx.set_paint(paint_color(color));
            if let GlyphPaint::Stroke(width) = *paint {
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
            }
            let glyphs = shaped.glyphs.iter().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            let run = ctx.glyph_run(&shaped.font).font_size(shaped.font_size);
            match paint {
                GlyphPaint::Fill => run.fill_glyphs(glyphs),
                GlyphPaint::Stroke(_) => run.stroke_glyphs(glyphs),
            }
        })
    }

    fn composite_scratch(&mut self, scratch: &vello_cpu::Pixmap) -> ForgeResult<()> {
        let s = self.surface_mut()?;
        over_in_place(s.pixmap.data_as_u8_slice_mut(), scratch.data_as_u8_slice())
    }

    /// Blur `mask` around `bounds` and composite it onto the surface.
    fn composite_shadow(
        &mut self,
        mask: &vello_cpu::Pixmap,
        bounds: vello_cpu::kurbo::Rect,
        shadow: Shadow,
    ) -> ForgeResult<()> {
        let s = self.surface()?;
        let (w, h) = (u32::from(s.width), u32::from(s.height));
        let pad = f64::from(shadow.radius_px);
        let Some(region) = Region::clipped(
            bounds.x0 - pad,
            bounds.y0 - pad,
            bounds.x1 + pad,
            bounds.y1 + pad,
            w,
            h,
        ) else {
            return Ok(());
        };

        let patch = extract_region(mask.data_as_u8_slice(), w, region)?;
        let blurred = blur_rgba8_premul(
            &patch,
            region.width,
            region.height,
            shadow.radius_px,
            shadow.sigma,
        )?;
        let s = self.surface_mut()?;
        over_region_in_place(s.pixmap.data_as_u8_slice_mut(), w, &blurred, region)
    }
}

impl PassBackend for CpuBackend {
    fn begin_frame(&mut self, canvas: Canvas, base: Option<&BaseImage>) -> ForgeResult<()> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ForgeError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ForgeError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(ForgeError::render("surface must be non-empty"));
        }

        let reuse = self
            .surface
            .as_ref()
            .is_some_and(|s| s.width == width && s.height == height);
        if !reuse {
            self.surface = Some(CpuSurface {
                width,
                height,
                pixmap: vello_cpu::Pixmap::new(width, height),
            });
        }
        self.shaped.clear();

        let s = self.surface_mut()?;
        let data = s.pixmap.data_as_u8_slice_mut();
        match base {
            Some(base) => {
                if base.canvas != canvas || base.rgba8_premul.len() != data.len() {
                    return Err(ForgeError::render(format!(
                        "base image is {}x{}, frame is {}x{}",
                        base.canvas.width, base.canvas.height, canvas.width, canvas.height
                    )));
                }
                data.copy_from_slice(&base.rgba8_premul);
            }
            None => data.fill(0),
        }
        Ok(())
    }

    fn exec_selection_box(&mut self, op: &SelectionBoxOp) -> ForgeResult<()> {
        let width = self.text_width(&op.run)?;
        let size = f64::from(op.run.size_px);
        let (x, y) = (op.run.anchor.x, op.run.anchor.y);
        let rect = vello_cpu::kurbo::Rect::new(
            x - width / 2.0 - op.padding,
            y - size / 2.0 - op.padding,
            x + width / 2.0 + op.padding,
            y + size / 2.0 + op.padding,
        );

        let dashed: vello_cpu::kurbo::BezPath =
            vello_cpu::kurbo::dash(rect.path_elements(0.1), 0.0, &op.dash).collect();
        let stroke = vello_cpu::kurbo::Stroke::new(op.stroke_width);
        let scratch = self.render_scratch(|ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(paint_color(op.color));
            ctx.set_stroke(stroke);
            ctx.stroke_path(&dashed);
        })?;
        self.composite_scratch(&scratch)
    }

    fn exec_text_stroke(&mut self, op: &TextStrokeOp) -> ForgeResult<()> {
        let Some(shaped) = self.shape(&op.run)? else {
            return Ok(());
        };
        let origin = text_origin(&op.run, &shaped);

        if let Some(shadow) = op.shadow {
            let mask = self.render_glyphs(
                &shaped,
                origin,
                shadow.color,
                &GlyphPaint::Stroke(op.width),
            )?;
            // Glyph outlines can overhang the layout box (italics, swashes).
            let margin = op.width + f64::from(shaped.font_size) * 0.25;
            let bounds = vello_cpu::kurbo::Rect::new(
                origin.0 - margin,
                origin.1 - margin,
                origin.0 + shaped.width + margin,
                origin.1 + shaped.height + margin,
            );
            self.composite_shadow(&mask, bounds, shadow)?;
        }

        let scratch =
            self.render_glyphs(&shaped, origin, op.color, &GlyphPaint::Stroke(op.width))?;
        self.composite_scratch(&scratch)
    }

    fn exec_text_fill(&mut self, op: &TextFillOp) -> ForgeResult<()> {
        let Some(shaped) = self.shape(&op.run)? else {
            return Ok(());
        };
        let origin = text_origin(&op.run, &shaped);
        let scratch = self.render_glyphs(&shaped, origin, op.color, &GlyphPaint::Fill)?;
        self.composite_scratch(&scratch)
    }

    fn readback_rgba8(&mut self, plan: &RenderPlan) -> ForgeResult<FrameRGBA> {
        let s = self.surface()?;
        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: s.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

pub(crate) fn estimate_width(run: &TextRun) -> f64 {
    FALLBACK_ADVANCE_EM * f64::from(run.size_px) * run.text.chars().count() as f64
}

/// Top-left of the layout box that centers `shaped` on the run anchor.
fn text_origin(run: &TextRun, shaped: &ShapedText) -> (f64, f64) {
    (
        run.anchor.x - shaped.width / 2.0,
        run.anchor.y - shaped.height / 2.0,
    )
}

fn paint_color(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
