//! Generation client module.

mod client;
mod gemini;

pub use client::GenerationClient;
pub use gemini::{GeminiClient, GeminiClientBuilder, ImageModel, TextModel};
