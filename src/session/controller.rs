//! Session state controller for the generate/edit flow.
//!
//! Holds all mutable session state and exposes the operations a UI binds
//! to: generate, apply an edit, upload an image, reset. Operations take
//! `&mut self`, so they cannot overlap; the loading guard additionally
//! turns re-entrant generate/edit requests into silent no-ops. Errors
//! never propagate out of an operation - they land in the session's
//! error field for the UI to display.

use crate::error::GardenError;
use crate::generation::GenerationClient;
use crate::media::{jpeg_data_url, UploadedImage};
use crate::session::loading::LoadingTicker;
use std::path::Path;

/// Fallback error when image generation fails without a usable message.
const GENERATE_FALLBACK: &str = "Failed to generate garden. Please try a different prompt.";

/// Fallback error when an edit fails without a usable message.
const EDIT_FALLBACK: &str = "Failed to apply edit. Please try again.";

/// Drives one interactive garden session against a generation client.
pub struct SessionController<C> {
    client: C,
    prompt: String,
    edit_prompt: String,
    original_prompt: String,
    uploaded_image: Option<UploadedImage>,
    generated_image: Option<String>,
    error: Option<String>,
    loading: Option<LoadingTicker>,
}

/// A plain snapshot of session state for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Current prompt text.
    pub prompt: String,
    /// Current edit instruction text.
    pub edit_prompt: String,
    /// The image to show: generated if present, else uploaded.
    pub display_image: Option<String>,
    /// Whether a generation is in flight.
    pub is_loading: bool,
    /// Rotating status message, when loading.
    pub loading_message: Option<&'static str>,
    /// Last user-facing failure message.
    pub error: Option<String>,
}

impl<C: GenerationClient> SessionController<C> {
    /// Creates a controller with empty session state.
    pub fn new(client: C) -> Self {
        Self {
            client,
            prompt: String::new(),
            edit_prompt: String::new(),
            original_prompt: String::new(),
            uploaded_image: None,
            generated_image: None,
            error: None,
            loading: None,
        }
    }

    /// Generates a fresh garden image from `prompt`.
    ///
    /// Silent no-op when the prompt is empty or a generation is already
    /// in flight. Clears any uploaded and previously generated image up
    /// front, then records the prompt and calls the client. Loading
    /// always stops when the call resolves, success or failure.
    pub async fn generate(&mut self, prompt: impl Into<String>) {
        let prompt = prompt.into();
        if prompt.is_empty() || self.is_loading() {
            return;
        }

        self.prompt = prompt;
        self.start_loading();
        self.uploaded_image = None;
        self.generated_image = None;
        self.original_prompt = self.prompt.clone();

        match self.client.generate_image(&self.original_prompt).await {
            Ok(base64) => self.generated_image = Some(jpeg_data_url(&base64)),
            Err(e) => self.surface_error(&e.to_string(), GENERATE_FALLBACK),
        }
        self.stop_loading();
    }

    /// Refines the current garden with an edit instruction.
    ///
    /// Silent no-op when the instruction is empty or a generation is in
    /// flight. With an uploaded image present, the image plus instruction
    /// are sent for prompt derivation and the image is consumed on
    /// success; otherwise the instruction is appended to the accumulated
    /// prompt. The currently displayed generated image is not cleared up
    /// front, so a failed edit leaves it visible.
    pub async fn apply_edit(&mut self, edit: impl Into<String>) {
        let edit = edit.into();
        if edit.is_empty() || self.is_loading() {
            return;
        }

        self.edit_prompt = edit.clone();
        self.start_loading();

        let new_prompt = if let Some(uploaded) = self.uploaded_image.clone() {
            match self
                .client
                .derive_edited_prompt(&uploaded.base64, &uploaded.mime_type, &edit)
                .await
            {
                Ok(derived) => {
                    // One-shot consumption: the upload informed this edit.
                    self.uploaded_image = None;
                    derived
                }
                Err(e) => {
                    self.surface_error(&e.to_string(), EDIT_FALLBACK);
                    self.stop_loading();
                    return;
                }
            }
        } else {
            format!("{}, {}", self.original_prompt, edit)
        };

        self.original_prompt = new_prompt;
        match self.client.generate_image(&self.original_prompt).await {
            Ok(base64) => {
                self.generated_image = Some(jpeg_data_url(&base64));
                self.edit_prompt.clear();
            }
            Err(e) => self.surface_error(&e.to_string(), EDIT_FALLBACK),
        }
        self.stop_loading();
    }

    /// Loads an image file as the session's uploaded image.
    ///
    /// A read failure or unrecognized content surfaces an error and
    /// leaves all other state untouched. On success the session is fully
    /// reset before the upload is installed.
    pub async fn upload_file(&mut self, path: impl AsRef<Path>) {
        let bytes = match tokio::fs::read(path.as_ref()).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, path = %path.as_ref().display(), "file read failed");
                self.error = Some(GardenError::FileRead(e).to_string());
                return;
            }
        };

        match UploadedImage::from_bytes(&bytes) {
            Ok(image) => self.install_upload(image),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Accepts an already-encoded `data:<mime>;base64,<payload>` string
    /// as the uploaded image.
    ///
    /// A header without an extractable MIME type surfaces an error
    /// without touching image state.
    pub fn upload_data_url(&mut self, data_url: &str) {
        match UploadedImage::from_data_url(data_url) {
            Ok(image) => self.install_upload(image),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Clears all session state and stops any loading rotation.
    ///
    /// Does not cancel an in-flight client call; operations hold
    /// exclusive access to the session, so none can be pending here.
    pub fn reset(&mut self) {
        self.prompt.clear();
        self.edit_prompt.clear();
        self.original_prompt.clear();
        self.generated_image = None;
        self.uploaded_image = None;
        self.error = None;
        self.loading = None;
    }

    fn install_upload(&mut self, image: UploadedImage) {
        self.reset();
        self.uploaded_image = Some(image);
    }

    fn start_loading(&mut self) {
        self.error = None;
        self.loading = Some(LoadingTicker::start());
    }

    fn stop_loading(&mut self) {
        self.loading = None;
    }

    fn surface_error(&mut self, message: &str, fallback: &str) {
        let message = if message.is_empty() { fallback } else { message };
        tracing::warn!(error = message, "session operation failed");
        self.error = Some(message.to_string());
    }

    /// Current prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replaces the prompt text (UI input binding).
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Current edit instruction text.
    pub fn edit_prompt(&self) -> &str {
        &self.edit_prompt
    }

    /// Replaces the edit instruction text (UI input binding).
    pub fn set_edit_prompt(&mut self, edit: impl Into<String>) {
        self.edit_prompt = edit.into();
    }

    /// The prompt that produced the displayed generated image.
    pub fn original_prompt(&self) -> &str {
        &self.original_prompt
    }

    /// The uploaded image awaiting an edit, if any.
    pub fn uploaded_image(&self) -> Option<&UploadedImage> {
        self.uploaded_image.as_ref()
    }

    /// The generated image as a data URL, if any.
    pub fn generated_image(&self) -> Option<&str> {
        self.generated_image.as_deref()
    }

    /// The image to display: generated if present, else uploaded.
    pub fn display_image(&self) -> Option<&str> {
        self.generated_image
            .as_deref()
            .or_else(|| self.uploaded_image.as_ref().map(|u| u.data_url.as_str()))
    }

    /// Whether a generation is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// The rotating status message, when loading.
    pub fn loading_message(&self) -> Option<&'static str> {
        self.loading.as_ref().map(|t| t.message())
    }

    /// Last user-facing failure message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Produces a plain snapshot for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            prompt: self.prompt.clone(),
            edit_prompt: self.edit_prompt.clone(),
            display_image: self.display_image().map(str::to_string),
            is_loading: self.is_loading(),
            loading_message: self.loading_message(),
            error: self.error.clone(),
        }
    }
}
