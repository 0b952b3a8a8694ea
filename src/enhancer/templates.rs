//! Generation request template and structured response schema

use serde_json::{json, Value};

/// Enhancement instruction template.
/// Slots are filled in the order they appear; filled values are never re-scanned.
pub const ENHANCE_REQUEST_TEMPLATE: &str = r#"Enhance the following text using the style/instruction provided.

Target Style Name: {style_name}
Style Specific Instructions: {style_instruction}

Enhancement Intensity Level: {intensity_level}
Intensity Instruction: {intensity_instruction}

Original text to enhance: "{original_text}"

General rules for the response:
- Adhere strictly to the requested intensity level.
- Improve clarity, vocabulary, and structural impact based on the target style.
- For AI prompts, optimize for maximum model adherence and clear constraints.
- For stories, make them immersive, evocative, and well-paced.
- Maintain the original intent but maximize quality."#;

/// Slot names, in template order
pub const REQUEST_SLOTS: [&str; 5] = [
    "{style_name}",
    "{style_instruction}",
    "{intensity_level}",
    "{intensity_instruction}",
    "{original_text}",
];

/// Fields every response must carry
pub const RESULT_FIELDS: [&str; 5] = ["original", "enhanced", "explanation", "keyChanges", "tips"];

/// Response schema declared to the generation service
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "original": { "type": "STRING" },
            "enhanced": { "type": "STRING" },
            "explanation": {
                "type": "STRING",
                "description": "Detailed explanation of what was improved."
            },
            "keyChanges": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Short bullet points of specific linguistic or structural changes."
            },
            "tips": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "General tips for the user to improve their writing in the future."
            }
        },
        "required": RESULT_FIELDS
    })
}
