//! Session state controller module.

mod controller;
mod loading;

pub use controller::{SessionController, SessionSnapshot};
pub use loading::LOADING_MESSAGES;
