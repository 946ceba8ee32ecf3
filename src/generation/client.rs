//! Generation client trait.

use crate::error::Result;
use async_trait::async_trait;

/// The two calls a garden session makes against a generative model service.
///
/// The session controller is generic over this trait so it can be driven
/// by a stub in tests.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generates a garden image from a text prompt.
    ///
    /// Returns the base64-encoded JPEG bytes of the single generated
    /// image. Fails when the endpoint produces no image (safety filter)
    /// or the transport fails; either way the error carries a user-safe
    /// message.
    async fn generate_image(&self, prompt: &str) -> Result<String>;

    /// Derives a fresh, detailed prompt from an uploaded image plus an
    /// edit instruction.
    ///
    /// The returned text replaces the session's accumulated prompt.
    async fn derive_edited_prompt(
        &self,
        image_base64: &str,
        mime_type: &str,
        instruction: &str,
    ) -> Result<String>;
}
