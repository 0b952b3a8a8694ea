//! Prompt Enhancer module
//! Builds structured generation requests and validates the structured replies

mod intensity;
mod prompt_enhancer;
mod result;
pub mod templates;

pub use intensity::{Intensity, IntensityError, MAX_INTENSITY, MIN_INTENSITY};
pub use prompt_enhancer::PromptEnhancer;
pub use result::{EnhancementResult, HistoryItem, HistoryLog, HISTORY_LIMIT};
