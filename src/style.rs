//! Rewriting styles: the predefined catalog plus user-created custom styles

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Style creation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("style name cannot be empty")]
    EmptyName,

    #[error("style instruction cannot be empty")]
    EmptyInstruction,
}

/// A named instruction set describing how text should be rewritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDefinition {
    pub id: String,
    pub name: String,
    pub instruction: String,
    pub is_custom: bool,
}

impl StyleDefinition {
    fn predefined(id: &str, name: &str, instruction: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            instruction: instruction.to_string(),
            is_custom: false,
        }
    }

    /// Create a custom style with id `custom-<millis>`.
    ///
    /// `taken` lists ids already in use; the millis suffix is bumped until
    /// the id is unique across it and the predefined catalog.
    pub fn custom(
        name: &str,
        instruction: &str,
        now_millis: i64,
        taken: &[StyleDefinition],
    ) -> Result<Self, StyleError> {
        let name = name.trim();
        let instruction = instruction.trim();

        if name.is_empty() {
            return Err(StyleError::EmptyName);
        }
        if instruction.is_empty() {
            return Err(StyleError::EmptyInstruction);
        }

        let predefined = predefined_styles();
        let mut millis = now_millis;
        let id = loop {
            let candidate = format!("custom-{}", millis);
            let in_use = taken
                .iter()
                .chain(predefined.iter())
                .any(|s| s.id == candidate);
            if !in_use {
                break candidate;
            }
            millis += 1;
        };

        Ok(Self {
            id,
            name: name.to_string(),
            instruction: instruction.to_string(),
            is_custom: true,
        })
    }
}

/// The built-in styles, in display order
pub fn predefined_styles() -> Vec<StyleDefinition> {
    vec![
        StyleDefinition::predefined(
            "creative",
            "Creative Writing",
            "Make it more descriptive and engaging. Focus on sensory details and character voice.",
        ),
        StyleDefinition::predefined(
            "agentic_ide",
            "Vibe Coding & Agentic IDEs",
            "Act as a professional prompt engineer for coding agents (e.g., Cursor, Windsurf, Copilot). Refine user input into actionable, step-by-step instructions. Focus on optimizing for clarity, providing relevant technical details, specifying architectural constraints, and ensuring instructions are optimized for model adherence in an iterative development workflow.",
        ),
        StyleDefinition::predefined(
            "vibe_coding",
            "Workflow Architect",
            "Act as an Expert Workflow Architect for Agentic IDEs. Restructure the user input into a logical, iterative implementation plan. Use clear system-level instructions, step-by-step logic, and specify expected tech stacks where applicable. Focus on readability for a coding agent.",
        ),
        StyleDefinition::predefined(
            "image_gen",
            "Image Generation",
            "Act as a Professional Prompt Engineer for Midjourney/DALL-E. Expand the user's idea into a highly descriptive synthesis prompt. Include technical details: lighting (e.g., cinematic, volumetric), lens (e.g., 85mm, wide-angle), composition (e.g., low-angle, rule of thirds), and specific artistic styles or mediums.",
        ),
        StyleDefinition::predefined(
            "professional",
            "Professional",
            "Refine for a corporate environment. Ensure polite, clear, and concise language. Focus on actionable items and respect.",
        ),
        StyleDefinition::predefined(
            "academic",
            "Academic",
            "Use formal language, specialized terminology, and clear logical structure. Avoid contractions and colloquialisms.",
        ),
        StyleDefinition::predefined(
            "chatbot",
            "System Prompt",
            "Optimize as an instruction set for a Large Language Model. Use delimiters, specify persona, and define constraints clearly.",
        ),
        StyleDefinition::predefined(
            "casual",
            "Casual",
            "Keep it friendly, relatable, and suitable for social media. Use emojis sparingly and maintain a conversational flow.",
        ),
        StyleDefinition::predefined(
            "technical",
            "Technical Docs",
            "Focus on precision, step-by-step clarity, and lack of ambiguity. Use consistent terminology.",
        ),
    ]
}

/// The first predefined style, used at startup and as the fallback
pub fn default_style() -> StyleDefinition {
    predefined_styles().swap_remove(0)
}

/// Predefined styles followed by the given custom styles
pub fn all_styles(custom: &[StyleDefinition]) -> Vec<StyleDefinition> {
    let mut styles = predefined_styles();
    styles.extend(custom.iter().cloned());
    styles
}

/// Look a style up by id across the predefined catalog and `custom`
pub fn find_style(id: &str, custom: &[StyleDefinition]) -> Option<StyleDefinition> {
    predefined_styles()
        .into_iter()
        .chain(custom.iter().cloned())
        .find(|s| s.id == id)
}

/// Quick-start sample inputs for a style. Unknown and custom ids get the
/// creative writing samples.
pub fn example_inputs(style_id: &str) -> &'static [&'static str] {
    match style_id {
        "agentic_ide" => &[
            "I need a Python script to scrape a website and save it to a database.",
            "Help me add user authentication to my Next.js app with Supabase.",
            "Refactor this mess of a CSS file into clean Tailwind classes.",
            "Create a Dockerfile for a Node.js backend with a Redis cache layer.",
            "Fix the memory leak in this React useEffect hook.",
        ],
        "vibe_coding" => &[
            "Refactor this legacy React class component into a functional one using modern Hooks and Tailwind CSS.",
            "Build a responsive, glassmorphic landing page hero section with a floating 3D illustration.",
            "Implement a robust JWT-based authentication flow with refresh tokens and secure cookie storage.",
            "Create a reusable 'Command Palette' component with fuzzy search and keyboard shortcut support.",
            "Optimize this recursive data transformation utility to handle 100k+ nested objects efficiently.",
        ],
        "image_gen" => &[
            "A futuristic cyberpunk city in the style of Blade Runner.",
            "A portrait of a wise old wizard.",
            "An isometric 3D render of a tiny cozy forest cabin.",
        ],
        "professional" => &[
            "Ask for a salary increase.",
            "Draft a professional rejection email.",
            "Explain a 2-day project delay.",
        ],
        "academic" => &[
            "The implications of universal basic income.",
            "Summarize photosynthesis.",
            "Analyze isolated themes in literature.",
        ],
        "chatbot" => &[
            "Explain black holes to 8-year-olds.",
            "Act as a travel guide for Mars.",
            "Troubleshoot a leaking faucet.",
        ],
        "casual" => &[
            "Caption for a photo of me eating pizza.",
            "Invite friends to a BBQ.",
            "Funny way to tell roommates I'm moving.",
        ],
        "technical" => &[
            "Configure secure SSH connection.",
            "Difference between REST and GraphQL.",
            "Setting up a React project with TS.",
        ],
        _ => &[
            "A lonely clockmaker discovers a watch that can pause time.",
            "Write a short poem about the first snowfall.",
            "The secret life of a houseplant.",
        ],
    }
}
