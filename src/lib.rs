//! prompt-forge library - style-driven text enhancement with reusable templates

pub mod app;
pub mod config;
pub mod enhancer;
pub mod error;
pub mod http_logger;
pub mod service;
pub mod store;
pub mod style;
pub mod template;
pub mod utils;

// Re-export commonly used types
pub use app::{App, AppState, Theme};
pub use config::{Config, ConfigOptions};
pub use enhancer::{EnhancementResult, HistoryItem, Intensity, PromptEnhancer};
pub use error::{EnhanceError, FailureKind, GENERIC_FAILURE_MESSAGE};
pub use store::{FileStore, MemoryStore};
pub use style::StyleDefinition;
pub use template::{extract_placeholders, render, PromptTemplate};
