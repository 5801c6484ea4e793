use crate::compile::plan::{
    DrawOp, RenderPlan, SelectionBoxOp, Shadow, TextFillOp, TextRun, TextStrokeOp,
};
use crate::foundation::color::Color;
use crate::foundation::core::Canvas;
use crate::layers::model::{LayerId, TextLayer};

pub const SELECTION_PADDING: f64 = 25.0;
pub const SELECTION_STROKE_WIDTH: f64 = 4.0;
pub const SELECTION_DASH: [f64; 2] = [15.0, 10.0];
/// rgba(59, 130, 246, 0.8)
pub const SELECTION_COLOR: Color = Color::rgba(59, 130, 246, 204);

/// Canvas-style shadow blur; the gaussian sigma is half of it.
pub const SHADOW_BLUR: f32 = 20.0;
/// rgba(0, 0, 0, 0.9)
pub const SHADOW_COLOR: Color = Color::rgba(0, 0, 0, 230);

pub const MIN_OUTLINE_WIDTH: f64 = 6.0;

/// Outline width for a font size: `max(6, size / 7)`.
pub fn outline_width(font_size: u32) -> f64 {
    (f64::from(font_size) / 7.0).max(MIN_OUTLINE_WIDTH)
}

pub fn text_shadow() -> Shadow {
    let sigma = SHADOW_BLUR / 2.0;
    Shadow {
        color: SHADOW_COLOR,
        sigma,
        radius_px: (sigma * 3.0).ceil() as u32,
    }
}

/// Build the draw list for one frame.
///
/// Layers paint in list order. Blank layers are skipped. The layer whose id equals `active` gets
/// its selection box ahead of its text passes; pass `None` for export output.
pub fn compile_frame(canvas: Canvas, layers: &[TextLayer], active: Option<LayerId>) -> RenderPlan {
    let mut ops = Vec::with_capacity(layers.len() * 3);

    for layer in layers.iter().filter(|l| !l.is_blank()) {
        let run = TextRun {
            anchor: canvas.percent_to_px(layer.anchor()),
            text: layer.text.to_uppercase(),
            font: layer.font,
            size_px: layer.font_size as f32,
        };

        if active == Some(layer.id) {
            ops.push(DrawOp::SelectionBox(SelectionBoxOp {
                run: run.clone(),
                padding: SELECTION_PADDING,
                stroke_width: SELECTION_STROKE_WIDTH,
                dash: SELECTION_DASH,
                color: SELECTION_COLOR,
            }));
        }

        ops.push(DrawOp::TextStroke(TextStrokeOp {
            run: run.clone(),
            width: outline_width(layer.font_size),
            color: layer.outline_color,
            shadow: Some(text_shadow()),
        }));
        ops.push(DrawOp::TextFill(TextFillOp {
            run,
            color: layer.text_color,
        }));
    }

    RenderPlan { canvas, ops }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
