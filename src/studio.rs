use std::sync::Arc;

use tokio::sync::mpsc;

use crate::assets::decode::BaseImage;
use crate::export::{ExportedPng, encode_png, export_file_name};
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::generate::config::GeneratorConfig;
use crate::generate::service::{ImagePayload, Insights, ThumbnailService};
use crate::interaction::{DisplayRect, InteractionController, InteractionPhase, PointerEvent};
use crate::layers::model::{EditorState, LayerId, LayerPatch};
use crate::layers::presets::TextPreset;
use crate::render::backend::FrameRGBA;
use crate::render::pipeline::Compositor;

/// Text used when a layer is committed from blank input.
pub const PLACEHOLDER_TEXT: &str = "NEW TEXT";

/// Lifecycle of one kind of asynchronous service call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CallPhase {
    #[default]
    Idle,
    /// A request with this sequence number is in flight.
    Pending { seq: u64 },
    /// The latest request finished; errors carry the user-facing message.
    Resolved(Result<(), String>),
}

impl CallPhase {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// Copy and preview produced by the service so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub prompt: String,
    pub explanation: String,
    /// Last generated image as a `data:` URI.
    pub image_data_uri: Option<String>,
}

enum Completion {
    Insights {
        seq: u64,
        /// Text for the seeded layer, taken from the topic that was sent.
        seed: String,
        result: ForgeResult<Insights>,
    },
    Image {
        seq: u64,
        result: ForgeResult<(ImagePayload, BaseImage)>,
    },
}

/// Top-level editor controller.
///
/// Owns the editor state and drives the two service calls. Calls run on spawned tokio tasks and
/// report back over a channel; nothing changes until [`Studio::pump`] or
/// [`Studio::next_completion`] applies their results, so all mutation happens on the caller's
/// thread, one event at a time.
pub struct Studio {
    config: GeneratorConfig,
    state: EditorState,
    controller: InteractionController,
    display: DisplayRect,
    base: Option<Arc<BaseImage>>,
    result: Option<GenerationResult>,
    insights_phase: CallPhase,
    image_phase: CallPhase,
    error: Option<String>,
    service: Arc<dyn ThumbnailService>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    next_seq: u64,
    compositor: Compositor,
    frame: Option<FrameRGBA>,
    dirty: bool,
}

impl Studio {
    pub fn new(service: Arc<dyn ThumbnailService>, compositor: Compositor) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let canvas = crate::foundation::core::Canvas::CANONICAL;
        Self {
            config: GeneratorConfig::default(),
            state: EditorState::new(),
            controller: InteractionController::new(),
            display: DisplayRect::new(0.0, 0.0, f64::from(canvas.width), f64::from(canvas.height)),
            base: None,
            result: None,
            insights_phase: CallPhase::Idle,
            image_phase: CallPhase::Idle,
            error: None,
            service,
            tx,
            rx,
            next_seq: 0,
            compositor,
            frame: None,
            dirty: true,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GeneratorConfig {
        &mut self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn base_image(&self) -> Option<&Arc<BaseImage>> {
        self.base.as_ref()
    }

    pub fn insights_phase(&self) -> &CallPhase {
        &self.insights_phase
    }

    pub fn image_phase(&self) -> &CallPhase {
        &self.image_phase
    }

    /// User-facing message of the last failure, cleared by the next successful call.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn interaction_phase(&self) -> InteractionPhase {
        self.controller.phase(&self.state)
    }

    /// Whether the cached preview frame is out of date.
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.frame.is_none()
    }

    fn take_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Start an insights request for the current config.
    ///
    /// A blank topic is reported through [`Studio::error`] and no call is made. The previous
    /// result is cleared while the request runs. Must be called from within a tokio runtime.
    pub fn generate(&mut self) -> ForgeResult<()> {
        if let Err(e) = self.config.validate() {
            self.error = Some(e.user_message());
            return Err(e);
        }
        if self.insights_phase.is_pending() {
            return Err(ForgeError::validation("a prompt is already being generated"));
        }

        self.error = None;
        self.result = None;
        let seq = self.take_seq();
        self.insights_phase = CallPhase::Pending { seq };
        tracing::debug!(seq, topic = %self.config.topic, "insights requested");

        let seed = self.config.seed_text();
        let call = self.service.request_insights(&self.config);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = call.await;
            // Fails only once the studio is dropped.
            let _ = tx.send(Completion::Insights { seq, seed, result });
        });
        Ok(())
    }

    /// Start an image request for the current prompt. Must be called from within a tokio runtime.
    pub fn preview_image(&mut self) -> ForgeResult<()> {
        let prompt = match &self.result {
            Some(r) if !r.prompt.trim().is_empty() => r.prompt.clone(),
            _ => return Err(ForgeError::validation("no prompt to render yet")),
        };
        if self.image_phase.is_pending() {
            return Err(ForgeError::validation("an image is already being generated"));
        }

        let seq = self.take_seq();
        self.image_phase = CallPhase::Pending { seq };
        tracing::debug!(seq, "image requested");

        let call = self.service.request_base_image(&prompt);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match call.await {
                Ok(payload) => decode_payload(payload).await,
                Err(e) => Err(e),
            };
            let _ = tx.send(Completion::Image { seq, result });
        });
        Ok(())
    }

    /// Apply every completion that has already arrived. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            if self.apply(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next completion and apply it.
    ///
    /// Returns `false` without waiting when no call is pending, or when the completion that
    /// arrived was stale.
    pub async fn next_completion(&mut self) -> bool {
        if !self.insights_phase.is_pending() && !self.image_phase.is_pending() {
            return false;
        }
        match self.rx.recv().await {
            Some(completion) => self.apply(completion),
            None => false,
        }
    }

    fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Insights { seq, seed, result } => {
                if self.insights_phase != (CallPhase::Pending { seq }) {
                    tracing::debug!(seq, "dropping stale insights completion");
                    return false;
                }
                match result {
                    Ok(insights) => {
                        self.result = Some(GenerationResult {
                            prompt: insights.prompt,
                            explanation: insights.explanation,
                            image_data_uri: None,
                        });
                        if self.state.is_empty() {
                            let id = self.state.add_layer(seed);
                            self.state.set_active(Some(id));
                            self.dirty = true;
                        }
                        self.error = None;
                        self.insights_phase = CallPhase::Resolved(Ok(()));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "insights generation failed");
                        let msg = e.user_message();
                        self.error = Some(msg.clone());
                        self.insights_phase = CallPhase::Resolved(Err(msg));
                    }
                }
            }
            Completion::Image { seq, result } => {
                if self.image_phase != (CallPhase::Pending { seq }) {
                    tracing::debug!(seq, "dropping stale image completion");
                    return false;
                }
                match result {
                    Ok((payload, base)) => {
                        if let Some(r) = self.result.as_mut() {
                            r.image_data_uri = Some(payload.to_data_uri());
                        }
                        self.base = Some(Arc::new(base));
                        self.dirty = true;
                        self.error = None;
                        self.image_phase = CallPhase::Resolved(Ok(()));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "image generation failed");
                        let msg = e.user_message();
                        self.error = Some(msg.clone());
                        self.image_phase = CallPhase::Resolved(Err(msg));
                    }
                }
            }
        }
        true
    }

    /// Install a base image directly (e.g. a local file), replacing the current one.
    pub fn set_base_image(&mut self, base: BaseImage) {
        self.base = Some(Arc::new(base));
        self.dirty = true;
    }

    /// Where the canvas is displayed, in client coordinates.
    pub fn set_display_rect(&mut self, display: DisplayRect) {
        self.display = display;
    }

    /// Route a pointer event to the interaction controller.
    ///
    /// Ignored until a base image exists. Returns whether the layer model changed.
    pub fn pointer(&mut self, event: &PointerEvent) -> bool {
        if self.base.is_none() {
            return false;
        }
        let changed = self.controller.handle(&mut self.state, self.display, event);
        self.dirty |= changed;
        changed
    }

    /// Add a layer from the text input (trimmed, or [`PLACEHOLDER_TEXT`] when blank) and select it.
    pub fn commit_text(&mut self, input: &str) -> LayerId {
        let text = match input.trim() {
            "" => PLACEHOLDER_TEXT,
            t => t,
        };
        let id = self.state.add_layer(text);
        self.state.set_active(Some(id));
        self.dirty = true;
        id
    }

    pub fn remove_layer(&mut self, id: LayerId) {
        self.state.remove_layer(id);
        self.dirty = true;
    }

    pub fn select(&mut self, id: Option<LayerId>) {
        self.state.set_active(id);
        self.dirty = true;
    }

    pub fn update_active(&mut self, patch: &LayerPatch) -> bool {
        let changed = self.state.update_active(patch);
        self.dirty |= changed;
        changed
    }

    pub fn apply_preset(&mut self, preset: &TextPreset) -> bool {
        let changed = self.state.apply_preset(preset);
        self.dirty |= changed;
        changed
    }

    /// Current preview frame, redrawn only when something changed.
    ///
    /// `None` until a base image exists.
    pub fn frame(&mut self) -> ForgeResult<Option<&FrameRGBA>> {
        let Some(base) = self.base.clone() else {
            return Ok(None);
        };
        if self.is_dirty() {
            let frame = self.compositor.render_preview(Some(&base), &self.state)?;
            self.frame = Some(frame);
            self.dirty = false;
        }
        Ok(self.frame.as_ref())
    }

    /// Render a selection-free frame and encode it as a timestamped PNG.
    #[tracing::instrument(skip_all)]
    pub fn export_png(&mut self) -> ForgeResult<ExportedPng> {
        let base = self
            .base
            .clone()
            .ok_or_else(|| ForgeError::validation("no base image to export"))?;
        let frame = self
            .compositor
            .render_export(Some(&base), self.state.layers())?;
        let bytes = encode_png(&frame)?;
        let file_name = export_file_name(chrono::Utc::now());
        tracing::debug!(file_name = %file_name, len = bytes.len(), "exported");
        Ok(ExportedPng { file_name, bytes })
    }
}

async fn decode_payload(payload: ImagePayload) -> ForgeResult<(ImagePayload, BaseImage)> {
    let bytes = payload.bytes.clone();
    let decoded = tokio::task::spawn_blocking(move || BaseImage::decode(&bytes))
        .await
        .map_err(|e| ForgeError::image_generation(format!("decode task failed: {e}")))?;
    match decoded {
        Ok(base) => Ok((payload, base)),
        Err(e) => Err(ForgeError::image_generation(format!(
            "generated image could not be decoded: {e}"
        ))),
    }
}
