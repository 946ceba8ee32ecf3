//! Basic garden generation example.
//!
//! Run with: `cargo run --example generate_garden -- "a zen rock garden"`
//!
//! Requires `GOOGLE_API_KEY` environment variable.

use base64::Engine;
use gardengen::{GeminiClient, SessionController};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "a lush English cottage garden in full bloom".to_string());

    let client = GeminiClient::builder().build()?;
    let mut session = SessionController::new(client);

    session.generate(&prompt).await;

    if let Some(error) = session.error() {
        eprintln!("{error}");
        std::process::exit(1);
    }

    let data_url = session.display_image().expect("image present on success");
    let base64 = data_url
        .strip_prefix("data:image/jpeg;base64,")
        .expect("generated images are JPEG data URLs");
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(base64)
        .expect("valid base64 from the API");

    std::fs::write("garden.jpg", &bytes)?;
    println!("Generated garden saved to garden.jpg ({} bytes)", bytes.len());

    Ok(())
}
