#![warn(missing_docs)]
//! gardengen - session engine for AI garden image generation.
//!
//! This crate drives an interactive "describe, generate, refine" loop
//! against Google's generative model APIs: a user describes a garden (or
//! uploads a photo of one), gets a generated image back, and iterates
//! with follow-up edit instructions. The [`SessionController`] owns all
//! session state and the generate/edit/upload/reset operations a UI
//! binds to; the [`GeminiClient`] is the thin adapter behind it.
//!
//! # Quick Start
//!
//! ```no_run
//! use gardengen::{GeminiClient, SessionController};
//!
//! #[tokio::main]
//! async fn main() -> gardengen::Result<()> {
//!     let client = GeminiClient::builder().build()?;
//!     let mut session = SessionController::new(client);
//!
//!     session.generate("a zen rock garden with raked gravel").await;
//!     if let Some(url) = session.display_image() {
//!         println!("{url}");
//!     }
//!
//!     session.apply_edit("add a small koi pond").await;
//!     Ok(())
//! }
//! ```
//!
//! # Swapping the backend
//!
//! The controller is generic over [`GenerationClient`], so tests (or an
//! alternative provider) can stand in for the real service.

mod error;
mod generation;
mod media;
mod session;

pub use error::{GardenError, Result};
pub use generation::{GeminiClient, GeminiClientBuilder, GenerationClient, ImageModel, TextModel};
pub use media::{ImageFormat, UploadedImage};
pub use session::{SessionController, SessionSnapshot, LOADING_MESSAGES};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{GardenError, Result};
    pub use crate::generation::{GeminiClient, GenerationClient};
    pub use crate::media::UploadedImage;
    pub use crate::session::{SessionController, SessionSnapshot};
}
