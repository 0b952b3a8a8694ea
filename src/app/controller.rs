//! Application controller: the only place state is mutated and persisted

use serde::Serialize;
use tracing::{info, warn};

use crate::enhancer::{EnhancementResult, HistoryItem, HistoryLog, Intensity, PromptEnhancer};
use crate::error::EnhanceError;
use crate::store::{Collection, KeyValueStore, Snapshots};
use crate::style::{all_styles, default_style, find_style, predefined_styles, StyleDefinition, StyleError};
use crate::template::{validate_template, PromptTemplate, TemplateError};

use super::state::{AppState, Theme};

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Save a snapshot, logging instead of failing
fn persist<S: KeyValueStore, T: Serialize + ?Sized>(
    snapshots: &mut Snapshots<S>,
    collection: Collection,
    data: &T,
) {
    if let Err(e) = snapshots.save(collection, data) {
        warn!("Failed to save '{}': {}", collection, e);
    }
}

/// Owns the state tree and its snapshot store
pub struct App<S: KeyValueStore> {
    state: AppState,
    snapshots: Snapshots<S>,
}

impl<S: KeyValueStore> App<S> {
    /// Read every snapshot once and build the initial state
    pub fn load(store: S) -> Self {
        let snapshots = Snapshots::new(store);

        let theme: Theme = snapshots.load(Collection::Theme);
        let history = HistoryLog::from_items(snapshots.load(Collection::History));
        let custom_styles = sanitize_custom_styles(snapshots.load(Collection::CustomStyles));
        let templates: Vec<PromptTemplate> = snapshots.load(Collection::Templates);

        info!(
            "Loaded {} custom styles, {} templates, {} history items",
            custom_styles.len(),
            templates.len(),
            history.len()
        );

        Self {
            state: AppState {
                theme,
                custom_styles,
                templates,
                history,
                ..AppState::default()
            },
            snapshots,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn snapshots(&self) -> &Snapshots<S> {
        &self.snapshots
    }

    /// Predefined then custom styles
    pub fn all_styles(&self) -> Vec<StyleDefinition> {
        all_styles(&self.state.custom_styles)
    }

    // ------------------------------------------------------------------
    // Theme
    // ------------------------------------------------------------------

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
        persist(&mut self.snapshots, Collection::Theme, &self.state.theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.state.theme.toggled());
        self.state.theme
    }

    // ------------------------------------------------------------------
    // Styles
    // ------------------------------------------------------------------

    /// Select a style by id; unknown ids leave the selection unchanged
    pub fn select_style(&mut self, id: &str) -> bool {
        match find_style(id, &self.state.custom_styles) {
            Some(style) => {
                self.state.selected_style = style;
                true
            }
            None => false,
        }
    }

    /// Create a custom style and select it
    pub fn add_custom_style(
        &mut self,
        name: &str,
        instruction: &str,
    ) -> Result<StyleDefinition, StyleError> {
        let style =
            StyleDefinition::custom(name, instruction, now_millis(), &self.state.custom_styles)?;

        self.state.custom_styles.push(style.clone());
        self.state.selected_style = style.clone();
        persist(
            &mut self.snapshots,
            Collection::CustomStyles,
            &self.state.custom_styles,
        );

        info!("Added custom style '{}' ({})", style.name, style.id);
        Ok(style)
    }

    /// Remove a custom style. Predefined styles cannot be removed.
    /// Removing the selected style falls back to the default style.
    pub fn delete_custom_style(&mut self, id: &str) -> bool {
        let before = self.state.custom_styles.len();
        self.state.custom_styles.retain(|s| s.id != id);
        if self.state.custom_styles.len() == before {
            return false;
        }

        if self.state.selected_style.id == id {
            self.state.selected_style = default_style();
        }
        persist(
            &mut self.snapshots,
            Collection::CustomStyles,
            &self.state.custom_styles,
        );
        true
    }

    pub fn set_intensity(&mut self, intensity: Intensity) {
        self.state.intensity = intensity;
    }

    // ------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------

    /// Create a template with a fresh id and store it
    pub fn create_template(
        &mut self,
        name: &str,
        content: &str,
    ) -> Result<PromptTemplate, TemplateError> {
        let mut millis = now_millis();
        while self.template(&format!("tpl-{}", millis)).is_some() {
            millis += 1;
        }

        let template = PromptTemplate::new(name, content, millis)?;
        self.save_template(template.clone())?;
        Ok(template)
    }

    /// Insert or replace a template by id
    pub fn save_template(&mut self, template: PromptTemplate) -> Result<(), TemplateError> {
        if template.name.trim().is_empty() {
            return Err(TemplateError::EmptyName);
        }
        if template.content.trim().is_empty() {
            return Err(TemplateError::EmptyContent);
        }
        validate_template(&template.content)?;

        match self.state.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template.clone(),
            None => self.state.templates.push(template.clone()),
        }
        self.state.composer.refresh_template(&template);

        persist(&mut self.snapshots, Collection::Templates, &self.state.templates);
        Ok(())
    }

    /// Delete a template; deleting the active one clears the input
    pub fn delete_template(&mut self, id: &str) -> bool {
        let before = self.state.templates.len();
        self.state.templates.retain(|t| t.id != id);
        if self.state.templates.len() == before {
            return false;
        }

        if self.state.composer.active_template_id() == Some(id) {
            self.state.composer.clear();
        }
        persist(&mut self.snapshots, Collection::Templates, &self.state.templates);
        true
    }

    pub fn template(&self, id: &str) -> Option<&PromptTemplate> {
        self.state.templates.iter().find(|t| t.id == id)
    }

    /// Activate a template, resetting its variable values
    pub fn select_template(&mut self, id: &str) -> bool {
        match self.state.templates.iter().find(|t| t.id == id) {
            Some(template) => {
                self.state.composer.select_template(template);
                true
            }
            None => false,
        }
    }

    pub fn set_variable(&mut self, name: &str, value: &str) {
        self.state.composer.set_value(name, value);
    }

    /// Free-text edit; detaches the text from an active template
    pub fn edit_input(&mut self, text: &str) {
        self.state.composer.edit_text(text);
    }

    pub fn reset_input(&mut self) {
        self.state.composer.clear();
    }

    // ------------------------------------------------------------------
    // Enhancement and history
    // ------------------------------------------------------------------

    /// Enhance the current input with the selected style and intensity.
    ///
    /// Returns `Ok(None)` without calling the service when the input is blank.
    /// On failure the generic message is kept in `state.error`.
    pub async fn enhance(
        &mut self,
        enhancer: &PromptEnhancer,
    ) -> Result<Option<EnhancementResult>, EnhanceError> {
        let input = self.state.composer.text().to_string();
        if input.trim().is_empty() {
            return Ok(None);
        }

        self.state.error = None;
        let style = self.state.selected_style.clone();

        match enhancer.enhance(&input, &style, self.state.intensity).await {
            Ok(result) => {
                self.record_result(result.clone(), now_millis());
                Ok(Some(result))
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Show a result and log it under the selected style. Returns the history id.
    pub fn record_result(&mut self, result: EnhancementResult, now_millis: i64) -> String {
        let item = HistoryItem::new(&self.state.selected_style, result.clone(), now_millis);

        self.state.result = Some(result);
        self.state.history.push(item);
        persist(&mut self.snapshots, Collection::History, &self.state.history);

        self.state
            .history
            .items()
            .first()
            .map(|i| i.id.clone())
            .unwrap_or_default()
    }

    /// Bring a past result back: result, original input, and its style if it still exists.
    /// Returns the restored item, whose `style_name` is the name recorded at the time.
    pub fn restore_history_item(&mut self, id: &str) -> Option<HistoryItem> {
        let item = self.state.history.find(id)?.clone();

        self.state.result = Some(item.result.clone());
        self.state.composer.clear();
        self.state.composer.edit_text(&item.result.original);
        if let Some(style) = find_style(&item.style_id, &self.state.custom_styles) {
            self.state.selected_style = style;
        }
        Some(item)
    }

    /// Empty the history and remove its snapshot
    pub fn clear_history(&mut self) {
        self.state.history.clear();
        if let Err(e) = self.snapshots.clear(Collection::History) {
            warn!("Failed to clear '{}': {}", Collection::History, e);
        }
    }
}

/// Drop stored custom styles whose ids collide with predefined or earlier ones
fn sanitize_custom_styles(styles: Vec<StyleDefinition>) -> Vec<StyleDefinition> {
    let predefined = predefined_styles();
    let mut kept: Vec<StyleDefinition> = Vec::with_capacity(styles.len());

    for mut style in styles {
        let taken = predefined
            .iter()
            .chain(kept.iter())
            .any(|s| s.id == style.id);
        if taken {
            warn!("Ignoring stored custom style with duplicate id '{}'", style.id);
            continue;
        }
        style.is_custom = true;
        kept.push(style);
    }

    kept
}
