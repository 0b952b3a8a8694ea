//! Service modules for the generation API

pub mod common;
pub(crate) mod gemini;

// Re-export commonly used items
pub use common::{map_auth_error, parse_enhancement_result, render_enhance_request};
pub use gemini::call_gemini_endpoint;
