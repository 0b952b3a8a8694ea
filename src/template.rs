//! Prompt templates and `{{placeholder}}` substitution

use std::collections::HashMap;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lazy_static;

/// Placeholder token pattern. Non-greedy, single line, contents taken verbatim.
fn placeholder_re() -> &'static Regex {
    lazy_static! {
        static ref PLACEHOLDER_RE: Regex = Regex::new(r"\{\{(.*?)\}\}").unwrap();
    }
    &*PLACEHOLDER_RE
}

/// Template validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template name cannot be empty")]
    EmptyName,

    #[error("template content cannot be empty")]
    EmptyContent,

    #[error("unclosed placeholder starting at byte {0}")]
    Unclosed(usize),

    #[error("empty placeholder at byte {0}")]
    EmptyPlaceholder(usize),

    #[error("placeholder '{0}' contains a brace or line break")]
    InvalidToken(String),
}

/// A reusable prompt skeleton
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
    pub content: String,
}

impl PromptTemplate {
    /// Create a new user template with a time-derived id.
    /// Name and content are trimmed, and the content must pass [`validate_template`].
    pub fn new(name: &str, content: &str, now_millis: i64) -> Result<Self, TemplateError> {
        let name = name.trim();
        let content = content.trim();

        if name.is_empty() {
            return Err(TemplateError::EmptyName);
        }
        if content.is_empty() {
            return Err(TemplateError::EmptyContent);
        }
        validate_template(content)?;

        Ok(Self {
            id: format!("tpl-{}", now_millis),
            name: name.to_string(),
            content: content.to_string(),
        })
    }

    pub fn placeholders(&self) -> Vec<String> {
        extract_placeholders(&self.content)
    }
}

/// Distinct placeholder tokens in first-occurrence order
pub fn extract_placeholders(content: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();

    for caps in placeholder_re().captures_iter(content) {
        let token = &caps[1];
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }

    tokens
}

/// Substitute every placeholder with its value, or `[token]` when the value
/// is missing or empty.
///
/// Runs as a single pass over the original content, so substituted values are
/// never scanned for further placeholders.
pub fn render(content: &str, values: &HashMap<String, String>) -> String {
    placeholder_re()
        .replace_all(content, |caps: &Captures| {
            let token = &caps[1];
            match values.get(token) {
                Some(value) if !value.is_empty() => value.clone(),
                _ => format!("[{}]", token),
            }
        })
        .into_owned()
}

/// Reject placeholder syntax that [`extract_placeholders`] would not read
/// back as intended: an unclosed `{{`, an empty `{{}}`, or a token holding
/// braces or line breaks.
pub fn validate_template(content: &str) -> Result<(), TemplateError> {
    let mut offset = 0;

    while let Some(start) = content[offset..].find("{{") {
        let open = offset + start;
        let body_start = open + 2;

        let close = match content[body_start..].find("}}") {
            Some(rel) => body_start + rel,
            None => return Err(TemplateError::Unclosed(open)),
        };

        let token = &content[body_start..close];
        if token.is_empty() {
            return Err(TemplateError::EmptyPlaceholder(open));
        }
        if token.contains(['{', '}', '\n', '\r']) {
            return Err(TemplateError::InvalidToken(token.to_string()));
        }

        offset = close + 2;
    }

    Ok(())
}

/// Text input state: an optional active template, its variable values, and
/// the current text.
///
/// Editing the text directly detaches it from the template; only selecting a
/// template again re-attaches (and resets the values).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composer {
    template: Option<PromptTemplate>,
    values: HashMap<String, String>,
    text: String,
    detached: bool,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    pub fn active_template_id(&self) -> Option<&str> {
        self.template.as_ref().map(|t| t.id.as_str())
    }

    /// Placeholders of the active template, empty when none is active
    pub fn placeholders(&self) -> Vec<String> {
        self.template
            .as_ref()
            .map(|t| t.placeholders())
            .unwrap_or_default()
    }

    /// True once the text was edited by hand while a template was active
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn select_template(&mut self, template: &PromptTemplate) {
        self.template = Some(template.clone());
        self.values.clear();
        self.detached = false;
        self.text = render(&template.content, &self.values);
    }

    /// Record a variable value; the text follows while still attached
    pub fn set_value(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
        self.rerender();
    }

    pub fn edit_text(&mut self, text: &str) {
        if self.template.is_some() {
            self.detached = true;
        }
        self.text = text.to_string();
    }

    /// Pick up new content for the active template after an upsert
    pub fn refresh_template(&mut self, template: &PromptTemplate) {
        if self.active_template_id() != Some(template.id.as_str()) {
            return;
        }
        self.template = Some(template.clone());
        self.rerender();
    }

    /// Drop the active template and the derived text
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn rerender(&mut self) {
        if self.detached {
            return;
        }
        if let Some(template) = &self.template {
            self.text = render(&template.content, &self.values);
        }
    }
}
