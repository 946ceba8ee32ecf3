//! Gemini (Google) generation client.
//!
//! Issues the two calls behind a garden session: text-to-image against
//! the Imagen predict endpoint, and prompt derivation against a
//! multimodal generateContent endpoint. Both are single-shot; failures
//! are logged with their transport detail and normalized to a user-safe
//! [`GardenError::Generation`] message.

use crate::error::{GardenError, Result};
use crate::generation::client::GenerationClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// User-safe message for image generation failures.
pub(crate) const IMAGE_FAILED_MESSAGE: &str =
    "Image generation failed. Please check your prompt and API key.";

/// User-safe message for prompt derivation failures.
pub(crate) const DERIVE_FAILED_MESSAGE: &str =
    "Failed to interpret the image and edit request.";

/// Image generation model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageModel {
    /// Imagen 4 (photorealistic stills).
    #[default]
    Imagen4,
}

impl ImageModel {
    /// Returns the API model identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Imagen4 => "imagen-4.0-generate-001",
        }
    }
}

/// Text model variants used for prompt derivation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextModel {
    /// Gemini 2.5 Flash (fast multimodal).
    #[default]
    Flash25,
}

impl TextModel {
    /// Returns the API model identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flash25 => "gemini-2.5-flash",
        }
    }
}

/// Builder for [`GeminiClient`].
#[derive(Debug, Clone, Default)]
pub struct GeminiClientBuilder {
    api_key: Option<String>,
    image_model: ImageModel,
    text_model: TextModel,
}

impl GeminiClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `GOOGLE_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the image generation model.
    pub fn image_model(mut self, model: ImageModel) -> Self {
        self.image_model = model;
        self
    }

    /// Sets the prompt derivation model.
    pub fn text_model(mut self, model: TextModel) -> Self {
        self.text_model = model;
        self
    }

    /// Builds the client, resolving the API key.
    pub fn build(self) -> Result<GeminiClient> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or_else(|| {
                GardenError::Auth("GOOGLE_API_KEY not set and no API key provided".into())
            })?;

        Ok(GeminiClient {
            client: reqwest::Client::new(),
            api_key,
            image_model: self.image_model,
            text_model: self.text_model,
        })
    }
}

/// Client for Google's generative model endpoints.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    image_model: ImageModel,
    text_model: TextModel,
}

impl GeminiClient {
    /// Creates a new `GeminiClientBuilder`.
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::new()
    }

    async fn generate_image_impl(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();

        let url = format!("{}/models/{}:predict", API_BASE, self.image_model.as_str());
        let body = PredictRequest::for_prompt(prompt);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(status.as_u16(), &text));
        }

        let predict: PredictResponse = response.json().await?;

        // Safety-filtered prompts come back 200 with zero predictions.
        let prediction = predict.predictions.into_iter().next().ok_or_else(|| {
            GardenError::ContentBlocked(
                "No image was generated. The prompt might be unsafe.".into(),
            )
        })?;

        tracing::debug!(
            model = self.image_model.as_str(),
            duration_ms = start.elapsed().as_millis() as u64,
            "image generation complete"
        );

        Ok(prediction.bytes_base64_encoded)
    }

    async fn derive_prompt_impl(
        &self,
        image_base64: &str,
        mime_type: &str,
        instruction: &str,
    ) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            API_BASE,
            self.text_model.as_str()
        );
        let body = GenerateContentRequest::for_edit(image_base64, mime_type, instruction);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(status.as_u16(), &text));
        }

        let content: GenerateContentResponse = response.json().await?;

        let text = content
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                GardenError::UnexpectedResponse(
                    "Could not generate a new prompt from the image.".into(),
                )
            })?;

        Ok(text)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        match self.generate_image_impl(prompt).await {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                tracing::error!(error = %e, "image generation failed");
                Err(GardenError::Generation(IMAGE_FAILED_MESSAGE.into()))
            }
        }
    }

    async fn derive_edited_prompt(
        &self,
        image_base64: &str,
        mime_type: &str,
        instruction: &str,
    ) -> Result<String> {
        match self
            .derive_prompt_impl(image_base64, mime_type, instruction)
            .await
        {
            Ok(prompt) => Ok(prompt),
            Err(e) => {
                tracing::error!(error = %e, "prompt derivation failed");
                Err(GardenError::Generation(DERIVE_FAILED_MESSAGE.into()))
            }
        }
    }
}

fn parse_error(status: u16, text: &str) -> GardenError {
    if status == 401 || status == 403 {
        return GardenError::Auth(text.to_string());
    }
    let lower = text.to_lowercase();
    if lower.contains("safety") || lower.contains("blocked") || lower.contains("prohibited") {
        return GardenError::ContentBlocked(text.to_string());
    }
    GardenError::Api {
        status,
        message: text.to_string(),
    }
}

// Request/Response types - Imagen predict endpoint

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: String,
    output_mime_type: String,
}

impl PredictRequest {
    fn for_prompt(prompt: &str) -> Self {
        Self {
            instances: vec![PredictInstance {
                prompt: format!(
                    "Photorealistic, award-winning photo of: {}. \
                     High detail, vibrant colors, professional quality.",
                    prompt
                ),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: "1:1".into(),
                output_mime_type: "image/jpeg".into(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: String,
}

// Request/Response types - generateContent endpoint

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

/// A part in a generateContent request - inline image data or text.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GenerateContentRequest {
    fn for_edit(image_base64: &str, mime_type: &str, instruction: &str) -> Self {
        let parts = vec![
            RequestPart::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.to_string(),
                    data: image_base64.to_string(),
                },
            },
            RequestPart::Text {
                text: format!(
                    "Based on the provided image of a garden, generate a new, highly \
                     detailed, and vivid prompt for an image generation model. The new \
                     prompt should incorporate the following user request: \"{}\". The \
                     output should be only the new prompt itself, ready to be used to \
                     generate a new image.",
                    instruction
                ),
            },
        ];

        Self {
            contents: vec![Content { parts }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_identifiers() {
        assert_eq!(ImageModel::Imagen4.as_str(), "imagen-4.0-generate-001");
        assert_eq!(TextModel::Flash25.as_str(), "gemini-2.5-flash");
    }

    #[test]
    fn test_builder_with_explicit_key() {
        let client = GeminiClientBuilder::new().api_key("test-key").build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_predict_request_wraps_prompt() {
        let req = PredictRequest::for_prompt("a zen rock garden");
        assert_eq!(req.instances.len(), 1);
        let prompt = &req.instances[0].prompt;
        assert!(prompt.starts_with("Photorealistic, award-winning photo of: a zen rock garden."));
        assert!(prompt.ends_with("High detail, vibrant colors, professional quality."));
    }

    #[test]
    fn test_predict_request_serializes_camel_case() {
        let req = PredictRequest::for_prompt("roses");
        let json = serde_json::to_value(&req).unwrap();

        let params = json.get("parameters").unwrap();
        assert_eq!(params.get("sampleCount").unwrap(), 1);
        assert_eq!(params.get("aspectRatio").unwrap(), "1:1");
        assert_eq!(params.get("outputMimeType").unwrap(), "image/jpeg");
        assert!(params.get("sample_count").is_none());
    }

    #[test]
    fn test_predict_response_deserialization() {
        let json = r#"{
            "predictions": [{
                "bytesBase64Encoded": "Zm9vYmFy",
                "mimeType": "image/jpeg"
            }]
        }"#;
        let resp: PredictResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.predictions.len(), 1);
        assert_eq!(resp.predictions[0].bytes_base64_encoded, "Zm9vYmFy");
    }

    #[test]
    fn test_predict_response_empty() {
        // Safety-filtered prompts produce an empty predictions array.
        let resp: PredictResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.predictions.is_empty());
    }

    #[test]
    fn test_edit_request_image_part_first() {
        let req = GenerateContentRequest::for_edit("QUJD", "image/png", "add a fountain");
        let json = serde_json::to_value(&req).unwrap();

        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "QUJD");
        let text = parts[1]["text"].as_str().unwrap();
        assert!(text.contains("\"add a fountain\""));
        assert!(text.contains("only the new prompt itself"));
    }

    #[test]
    fn test_content_response_deserialization() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "A lush cottage garden at dusk"}]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let content = resp.candidates[0].content.as_ref().unwrap();
        assert_eq!(
            content.parts[0].text.as_deref(),
            Some("A lush cottage garden at dusk")
        );
    }

    #[test]
    fn test_content_response_no_text() {
        let json = r#"{"candidates": [{"content": {"parts": [{}]}}]}"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let content = resp.candidates[0].content.as_ref().unwrap();
        assert!(content.parts[0].text.is_none());
    }

    #[test]
    fn test_parse_error_classification() {
        assert!(matches!(parse_error(401, "bad key"), GardenError::Auth(_)));
        assert!(matches!(parse_error(403, "denied"), GardenError::Auth(_)));
        assert!(matches!(
            parse_error(400, "Request blocked by safety settings"),
            GardenError::ContentBlocked(_)
        ));
        assert!(matches!(
            parse_error(500, "internal"),
            GardenError::Api { status: 500, .. }
        ));
    }
}
