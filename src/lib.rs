pub mod completion;
pub mod config;
pub mod error;
pub mod language;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod service;
pub mod store;

pub use config::AppConfig;
pub use error::{AdGenError, Result};
pub use service::{AppState, create_app};
