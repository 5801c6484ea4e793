use crate::foundation::color::Color;
use crate::foundation::core::{Canvas, Point};
use crate::layers::model::FontFamily;

/// Backend-agnostic draw list for one frame.
///
/// The base image is not part of the plan; backends receive it alongside the plan and paint it
/// before the first op.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    pub canvas: Canvas,
    /// Ops in paint order.
    pub ops: Vec<DrawOp>,
}

/// One line of display text, centered on `anchor` (canvas pixels).
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub anchor: Point,
    /// Display text (already uppercased).
    pub text: String,
    pub font: FontFamily,
    pub size_px: f32,
}

/// Gaussian drop shadow painted under a text pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub sigma: f32,
    pub radius_px: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionBoxOp {
    pub run: TextRun,
    /// Gap between the measured text extent and the box outline.
    pub padding: f64,
    pub stroke_width: f64,
    /// Dash pattern `[on, off]`.
    pub dash: [f64; 2],
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStrokeOp {
    pub run: TextRun,
    pub width: f64,
    pub color: Color,
    pub shadow: Option<Shadow>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextFillOp {
    pub run: TextRun,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    SelectionBox(SelectionBoxOp),
    TextStroke(TextStrokeOp),
    TextFill(TextFillOp),
}

impl DrawOp {
    pub fn run(&self) -> &TextRun {
        match self {
            Self::SelectionBox(op) => &op.run,
            Self::TextStroke(op) => &op.run,
            Self::TextFill(op) => &op.run,
        }
    }
}
