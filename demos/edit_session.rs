//! Iterative editing example - upload a garden photo, then refine it.
//!
//! Run with: `cargo run --example edit_session -- <garden_photo.png>`
//!
//! Requires `GOOGLE_API_KEY` environment variable.

use gardengen::{GeminiClient, SessionController};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let input_path = std::env::args()
        .nth(1)
        .expect("Usage: edit_session <garden_photo.png>");

    let client = GeminiClient::builder().build()?;
    let mut session = SessionController::new(client);

    session.upload_file(&input_path).await;
    if let Some(error) = session.error() {
        eprintln!("{error}");
        std::process::exit(1);
    }
    println!("Uploaded {input_path}");

    // The first edit consumes the upload: the model derives a fresh
    // prompt from the photo plus the instruction.
    session.apply_edit("make it look like early autumn").await;
    if let Some(error) = session.error() {
        eprintln!("{error}");
        std::process::exit(1);
    }
    println!("Derived prompt: {}", session.original_prompt());

    // Further edits accumulate onto the derived prompt.
    session.apply_edit("add a winding stone path").await;
    if let Some(error) = session.error() {
        eprintln!("{error}");
        std::process::exit(1);
    }
    println!("Final prompt: {}", session.original_prompt());
    println!(
        "Display image: {} bytes of data URL",
        session.display_image().map(str::len).unwrap_or(0)
    );

    Ok(())
}
