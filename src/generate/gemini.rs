use std::time::Duration;

use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::json;
use tracing::Instrument as _;

use crate::foundation::error::{ForgeError, ForgeResult};
use crate::generate::config::GeneratorConfig;
use crate::generate::prompt::{image_instruction, insights_instruction};
use crate::generate::service::{ImagePayload, Insights, ThumbnailService};
use crate::settings::StudioSettings;

/// [`ThumbnailService`] backed by the Gemini `generateContent` REST API.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    insights_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn new(settings: &StudioSettings) -> ForgeResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("thumbforge/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            insights_model: settings.insights_model.clone(),
            image_model: settings.image_model.clone(),
        })
    }

    fn url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }

    fn post(
        &self,
        model: &str,
        body: serde_json::Value,
    ) -> BoxFuture<'static, anyhow::Result<String>> {
        let request = self
            .http
            .post(self.url(model))
            .header("x-goog-api-key", self.api_key.clone())
            .json(&body);
        let missing_key = self.api_key.trim().is_empty();
        async move {
            if missing_key {
                anyhow::bail!("no API key configured");
            }
            let response = request.send().await.context("send generateContent request")?;
            let status = response.status();
            let text = response.text().await.context("read generateContent response")?;
            if !status.is_success() {
                anyhow::bail!("generateContent returned {status}: {}", truncate(&text, 512));
            }
            Ok(text)
        }
        .boxed()
    }
}

impl ThumbnailService for GeminiClient {
    fn request_insights(
        &self,
        config: &GeneratorConfig,
    ) -> BoxFuture<'static, ForgeResult<Insights>> {
        let model = self.insights_model.clone();
        let call = self.post(&model, insights_body(config));
        let span = tracing::debug_span!("request_insights", model = %model);
        async move {
            let body = call.await.map_err(|e| {
                tracing::warn!(
                    error = %format!("{e:#}"),
                    model = %model,
                    "insights request failed"
                );
                ForgeError::generation(format!("{e:#}"))
            })?;
            parse_insights(&body).inspect_err(|e| {
                tracing::warn!(error = %e, model = %model, "insights response unusable");
            })
        }
        .instrument(span)
        .boxed()
    }

    fn request_base_image(&self, prompt: &str) -> BoxFuture<'static, ForgeResult<ImagePayload>> {
        let model = self.image_model.clone();
        let call = self.post(&model, image_body(prompt));
        let span = tracing::debug_span!("request_base_image", model = %model);
        async move {
            let body = call.await.map_err(|e| {
                tracing::warn!(
                    error = %format!("{e:#}"),
                    model = %model,
                    "image request failed"
                );
                ForgeError::image_generation(format!("{e:#}"))
            })?;
            extract_inline_image(&body).inspect_err(|e| {
                tracing::warn!(error = %e, model = %model, "image response unusable");
            })
        }
        .instrument(span)
        .boxed()
    }
}

pub(crate) fn insights_body(config: &GeneratorConfig) -> serde_json::Value {
    json!({
        "contents": [{ "parts": [{ "text": insights_instruction(config) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "prompt": {
                        "type": "STRING",
                        "description": "Detailed image generation prompt covering visual elements only."
                    },
                    "explanation": {
                        "type": "STRING",
                        "description": "Why this design earns clicks."
                    }
                },
                "required": ["prompt", "explanation"]
            }
        }
    })
}

pub(crate) fn image_body(prompt: &str) -> serde_json::Value {
    json!({
        "contents": [{ "parts": [{ "text": image_instruction(prompt) }] }],
        "generationConfig": {
            "responseModalities": ["TEXT", "IMAGE"],
            "imageConfig": { "aspectRatio": "16:9" }
        }
    })
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default = "default_image_mime")]
    mime_type: String,
    data: String,
}

fn default_image_mime() -> String {
    "image/png".to_string()
}

fn first_candidate_parts(resp: &GenerateResponse) -> &[Part] {
    resp.candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|c| c.parts.as_slice())
        .unwrap_or_default()
}

/// Parse a `generateContent` body whose text parts hold the `{prompt, explanation}` JSON.
pub(crate) fn parse_insights(body: &str) -> ForgeResult<Insights> {
    let resp: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| ForgeError::generation(format!("malformed response: {e}")))?;
    let text: String = first_candidate_parts(&resp)
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if text.trim().is_empty() {
        return Err(ForgeError::generation("response has no text part"));
    }
    serde_json::from_str::<Insights>(text.trim())
        .map_err(|e| ForgeError::generation(format!("unparseable insights: {e}")))
}

/// First inline image part of a `generateContent` body.
pub(crate) fn extract_inline_image(body: &str) -> ForgeResult<ImagePayload> {
    let resp: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| ForgeError::image_generation(format!("malformed response: {e}")))?;
    let inline = first_candidate_parts(&resp)
        .iter()
        .find_map(|p| p.inline_data.as_ref())
        .ok_or_else(|| ForgeError::image_generation("No image data found in response"))?;
    let bytes = STANDARD
        .decode(inline.data.trim())
        .map_err(|e| ForgeError::image_generation(format!("invalid image payload: {e}")))?;
    Ok(ImagePayload {
        mime_type: inline.mime_type.clone(),
        bytes,
    })
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/gemini.rs"]
mod tests;
