use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{ForgeError, ForgeResult};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_INSIGHTS_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Environment variables checked for the API key, first non-empty wins.
pub const API_KEY_VARS: [&str; 3] = ["THUMBFORGE_API_KEY", "GEMINI_API_KEY", "API_KEY"];
pub const FONTS_DIR_VAR: &str = "THUMBFORGE_FONTS_DIR";

/// Runtime configuration for the generation client and the renderer.
///
/// Every field has a default, so a settings file only needs the keys it overrides.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioSettings {
    /// Base URL of the `generateContent` API, without the trailing `/models/...`.
    pub endpoint: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub insights_model: String,
    pub image_model: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Directory scanned for `.ttf`/`.otf` faces. No directory means measured-only text.
    pub fonts_dir: Option<PathBuf>,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            insights_model: DEFAULT_INSIGHTS_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            timeout_secs: 120,
            fonts_dir: None,
        }
    }
}

impl std::fmt::Debug for StudioSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudioSettings")
            .field("endpoint", &self.endpoint)
            .field(
                "api_key",
                &if self.api_key.is_empty() {
                    "<unset>"
                } else {
                    "<redacted>"
                },
            )
            .field("insights_model", &self.insights_model)
            .field("image_model", &self.image_model)
            .field("timeout_secs", &self.timeout_secs)
            .field("fonts_dir", &self.fonts_dir)
            .finish()
    }
}

impl StudioSettings {
    /// Read settings from a JSON file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> ForgeResult<Self> {
        let settings = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("read settings '{}'", path.display()))?;
                Self::from_json(&text)?
            }
            None => Self::default(),
        };
        let settings = settings.with_env(|k| std::env::var(k).ok());
        settings.validate()?;
        tracing::debug!(?settings, "settings loaded");
        Ok(settings)
    }

    pub fn from_json(text: &str) -> ForgeResult<Self> {
        serde_json::from_str(text).map_err(|e| ForgeError::serde(e.to_string()))
    }

    /// Apply overrides from an environment lookup.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        if let Some(key) = API_KEY_VARS.iter().find_map(|&k| non_empty(k)) {
            self.api_key = key.trim().to_string();
        }
        if let Some(dir) = non_empty(FONTS_DIR_VAR) {
            self.fonts_dir = Some(PathBuf::from(dir));
        }
        self
    }

    pub fn validate(&self) -> ForgeResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(ForgeError::validation("endpoint must not be empty"));
        }
        if self.insights_model.trim().is_empty() || self.image_model.trim().is_empty() {
            return Err(ForgeError::validation("model names must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(ForgeError::validation("timeout_secs must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
