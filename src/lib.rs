//! thumbforge is the core of a video-thumbnail editor.
//!
//! Text layers are positioned in percentage space over a generated base image, picked and dragged
//! with pointer events, and composited deterministically onto a fixed 1280x720 canvas that exports
//! to PNG. A thin client to a generative service supplies the base image and the copy.
//!
//! - Edit layers through [`EditorState`] (or the higher-level [`Studio`])
//! - Route pointer input through [`InteractionController`]
//! - Render with [`Compositor`] and export with [`encode_png`]
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod compile;
pub(crate) mod export;
pub(crate) mod generate;
pub(crate) mod interaction;
pub(crate) mod layers;
pub(crate) mod render;
pub(crate) mod settings;
pub(crate) mod studio;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{ForgeError, ForgeResult};

pub use crate::assets::decode::BaseImage;
pub use crate::assets::fonts::{FALLBACK_ADVANCE_EM, FontBook, FontFace};
pub use crate::compile::compiler::compile_frame;
pub use crate::compile::plan::{
    DrawOp, RenderPlan, SelectionBoxOp, Shadow, TextFillOp, TextRun, TextStrokeOp,
};
pub use crate::export::{ExportedPng, encode_png, export_file_name};
pub use crate::generate::config::{EmotionalVibe, GeneratorConfig, Niche, VisualStyle};
pub use crate::generate::gemini::GeminiClient;
pub use crate::generate::service::{ImagePayload, Insights, ThumbnailService};
pub use crate::interaction::{
    DisplayRect, InteractionController, InteractionPhase, PointerEvent, PointerInput,
};
pub use crate::layers::hit::{SELECTION_RADIUS, find_nearest};
pub use crate::layers::model::{
    DEFAULT_FONT_SIZE, EditorState, FontFamily, LayerId, LayerPatch, MAX_FONT_SIZE, MIN_FONT_SIZE,
    TextLayer,
};
pub use crate::layers::presets::{TEXT_PRESETS, TextPreset};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::CpuBackend;
pub use crate::render::passes::{PassBackend, execute_plan};
pub use crate::render::pipeline::{Compositor, render_frame};
pub use crate::settings::StudioSettings;
pub use crate::studio::{CallPhase, GenerationResult, PLACEHOLDER_TEXT, Studio};
