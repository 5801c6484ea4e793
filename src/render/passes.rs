use crate::assets::decode::BaseImage;
use crate::compile::plan::{DrawOp, RenderPlan, SelectionBoxOp, TextFillOp, TextStrokeOp};
use crate::foundation::core::Canvas;
use crate::foundation::error::ForgeResult;
use crate::render::backend::FrameRGBA;

/// Executes the individual ops of a [`RenderPlan`].
pub trait PassBackend {
    /// Prepare the output surface and paint the base image (or clear it when there is none).
    fn begin_frame(&mut self, canvas: Canvas, base: Option<&BaseImage>) -> ForgeResult<()>;

    fn exec_selection_box(&mut self, op: &SelectionBoxOp) -> ForgeResult<()>;

    fn exec_text_stroke(&mut self, op: &TextStrokeOp) -> ForgeResult<()>;

    fn exec_text_fill(&mut self, op: &TextFillOp) -> ForgeResult<()>;

    fn readback_rgba8(&mut self, plan: &RenderPlan) -> ForgeResult<FrameRGBA>;
}

pub fn execute_plan<B: PassBackend + ?Sized>(
    backend: &mut B,
    plan: &RenderPlan,
    base: Option<&BaseImage>,
) -> ForgeResult<FrameRGBA> {
    backend.begin_frame(plan.canvas, base)?;

    for op in &plan.ops {
        match op {
            DrawOp::SelectionBox(op) => backend.exec_selection_box(op)?,
            DrawOp::TextStroke(op) => backend.exec_text_stroke(op)?,
            DrawOp::TextFill(op) => backend.exec_text_fill(op)?,
        }
    }

    backend.readback_rgba8(plan)
}

#[cfg(test)]
#[path = "../../tests/unit/render/passes.rs"]
mod tests;
