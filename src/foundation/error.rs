/// Convenience result type used across thumbforge.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Top-level error taxonomy used by editor, renderer and generation APIs.
#[derive(thiserror::Error, Debug)]
pub enum ForgeError {
    /// Generator configuration rejected before any upstream call was made.
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// Insights call failed or returned content that could not be parsed.
    #[error("generation error: {0}")]
    Generation(String),

    /// Image call failed or its response carried no image payload.
    #[error("image generation error: {0}")]
    ImageGeneration(String),

    /// Invalid user-provided data or an operation issued in the wrong state.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while executing a render plan.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ForgeError {
    /// Build a [`ForgeError::ConfigValidation`] value.
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Self::ConfigValidation(msg.into())
    }

    /// Build a [`ForgeError::Generation`] value.
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Build a [`ForgeError::ImageGeneration`] value.
    pub fn image_generation(msg: impl Into<String>) -> Self {
        Self::ImageGeneration(msg.into())
    }

    /// Build a [`ForgeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ForgeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ForgeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Message safe to show in the editor UI.
    ///
    /// Upstream failures collapse to a generic retry hint; the detail only goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigValidation(msg) | Self::Validation(msg) => msg.clone(),
            Self::Generation(_) => "Failed to generate prompt. Please try again.".to_owned(),
            Self::ImageGeneration(_) => "Failed to generate image preview.".to_owned(),
            Self::Render(_) | Self::Serde(_) | Self::Other(_) => {
                "Something went wrong. Please try again.".to_owned()
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
