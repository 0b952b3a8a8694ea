//! Application state tree

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::enhancer::{EnhancementResult, HistoryLog, Intensity};
use crate::style::{default_style, StyleDefinition};
use crate::template::{Composer, PromptTemplate};

/// Color theme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{}', expected light or dark", other)),
        }
    }
}

/// Everything the front end shows. Mutated only through [`super::App`].
#[derive(Debug, Clone)]
pub struct AppState {
    pub theme: Theme,
    pub custom_styles: Vec<StyleDefinition>,
    pub selected_style: StyleDefinition,
    pub intensity: Intensity,
    pub templates: Vec<PromptTemplate>,
    pub composer: Composer,
    pub result: Option<EnhancementResult>,
    pub history: HistoryLog,
    /// Last user-facing error message
    pub error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            custom_styles: Vec::new(),
            selected_style: default_style(),
            intensity: Intensity::default(),
            templates: Vec::new(),
            composer: Composer::new(),
            result: None,
            history: HistoryLog::new(),
            error: None,
        }
    }
}
