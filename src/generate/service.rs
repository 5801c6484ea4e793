use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{ForgeError, ForgeResult};
use crate::generate::config::GeneratorConfig;

/// Copy produced by the insights call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    /// Image-generation prompt describing visual content only.
    pub prompt: String,
    /// Why the design should perform well.
    pub explanation: String,
}

/// Encoded image bytes returned by the image call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    /// `data:<mime>;base64,<payload>`
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }

    pub fn from_data_uri(uri: &str) -> ForgeResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| ForgeError::validation("not a data uri"))?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| ForgeError::validation("data uri is not base64 encoded"))?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| ForgeError::validation(format!("invalid base64 payload: {e}")))?;
        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }
}

/// External generative collaborator.
///
/// Implementations must be cheap to share (`Arc`) and their futures must not borrow from the
/// service, so calls can run on spawned tasks.
pub trait ThumbnailService: Send + Sync {
    /// Fails with [`ForgeError::Generation`] when the upstream call fails or its answer cannot
    /// be parsed.
    fn request_insights(
        &self,
        config: &GeneratorConfig,
    ) -> BoxFuture<'static, ForgeResult<Insights>>;

    /// Fails with [`ForgeError::ImageGeneration`] when the answer carries no image.
    fn request_base_image(&self, prompt: &str) -> BoxFuture<'static, ForgeResult<ImagePayload>>;
}

#[cfg(test)]
#[path = "../../tests/unit/generate/service.rs"]
mod tests;
