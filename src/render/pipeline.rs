use crate::assets::decode::BaseImage;
use crate::assets::fonts::FontBook;
use crate::compile::compiler::compile_frame;
use crate::foundation::core::Canvas;
use crate::foundation::error::ForgeResult;
use crate::layers::model::{EditorState, LayerId, TextLayer};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::CpuBackend;
use crate::render::passes::{PassBackend, execute_plan};

/// Compile + render a single frame on the canonical canvas.
///
/// Pipeline:
/// 1. [`compile_frame`]
/// 2. [`execute_plan`] on `backend`
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
pub fn render_frame(
    backend: &mut dyn PassBackend,
    base: Option<&BaseImage>,
    layers: &[TextLayer],
    active: Option<LayerId>,
) -> ForgeResult<FrameRGBA> {
    let plan = compile_frame(Canvas::CANONICAL, layers, active);
    execute_plan(backend, &plan, base)
}

/// Owns the CPU backend and renders editor state into frames.
pub struct Compositor {
    backend: CpuBackend,
}

impl Compositor {
    pub fn new(fonts: FontBook) -> Self {
        Self {
            backend: CpuBackend::new(fonts),
        }
    }

    pub fn fonts(&self) -> &FontBook {
        self.backend.fonts()
    }

    /// Render layers over `base`, decorating the `active` layer with its selection box.
    #[tracing::instrument(skip_all, fields(layers = layers.len(), active = ?active))]
    pub fn render(
        &mut self,
        base: Option<&BaseImage>,
        layers: &[TextLayer],
        active: Option<LayerId>,
    ) -> ForgeResult<FrameRGBA> {
        render_frame(&mut self.backend, base, layers, active)
    }

    /// Interactive preview of `state`, selection box included.
    pub fn render_preview(
        &mut self,
        base: Option<&BaseImage>,
        state: &EditorState,
    ) -> ForgeResult<FrameRGBA> {
        self.render(base, state.layers(), state.active_id())
    }

    /// Export frame: identical to the preview except that no layer is decorated.
    pub fn render_export(
        &mut self,
        base: Option<&BaseImage>,
        layers: &[TextLayer],
    ) -> ForgeResult<FrameRGBA> {
        self.render(base, layers, None)
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(FontBook::empty())
    }
}
