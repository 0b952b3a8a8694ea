//! Common request/response helpers for the generation service

use anyhow::{anyhow, Result};

use crate::enhancer::templates::{ENHANCE_REQUEST_TEMPLATE, REQUEST_SLOTS};
use crate::enhancer::{EnhancementResult, Intensity};
use crate::error::FailureKind;
use crate::style::StyleDefinition;

/// Render the enhancement request without corrupting user input.
/// Uses split+concat instead of replace so slot names that appear inside the
/// style or the original text are left alone.
pub fn render_enhance_request(
    style: &StyleDefinition,
    intensity: Intensity,
    original_text: &str,
) -> Result<String> {
    let level = intensity.to_string();
    let values = [
        style.name.as_str(),
        style.instruction.as_str(),
        level.as_str(),
        intensity.descriptor(),
        original_text,
    ];

    let extra: usize = values.iter().map(|v| v.len()).sum();
    let mut rendered = String::with_capacity(ENHANCE_REQUEST_TEMPLATE.len() + extra);
    let mut rest = ENHANCE_REQUEST_TEMPLATE;

    for (slot, value) in REQUEST_SLOTS.iter().zip(values) {
        let (before, after) = rest
            .split_once(slot)
            .ok_or_else(|| anyhow!("ENHANCE_REQUEST_TEMPLATE missing {}", slot))?;
        rendered.push_str(before);
        rendered.push_str(value);
        rest = after;
    }
    rendered.push_str(rest);

    Ok(rendered)
}

/// Parse the model's JSON text into a result. Any shape mismatch fails.
pub fn parse_enhancement_result(text: &str) -> std::result::Result<EnhancementResult, FailureKind> {
    serde_json::from_str(text.trim()).map_err(|e| FailureKind::Schema(e.to_string()))
}

/// Map authentication status codes to a failure kind
pub fn map_auth_error(status: u16) -> Option<FailureKind> {
    match status {
        401 | 403 => Some(FailureKind::Unauthorized(status)),
        _ => None,
    }
}

/// Lazy static macro for regex
pub mod lazy_static {
    #[macro_export]
    macro_rules! lazy_static {
        ($(static ref $name:ident: $t:ty = $init:expr;)*) => {
            $(
                static $name: std::sync::LazyLock<$t> = std::sync::LazyLock::new(|| $init);
            )*
        };
    }
    pub use lazy_static;
}
