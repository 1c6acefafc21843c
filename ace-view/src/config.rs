//! The editor's initial configuration.
//!
//! [`EditorConfig`] mirrors Ace's option set using Ace's own option names,
//! so the same value can be loaded from a JSON file, rendered into the
//! bootstrap `editor.setOptions(...)` payload, or used to seed the
//! [`HeadlessEngine`](crate::HeadlessEngine). The defaults are the widget's
//! own defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::{AceKeyboardHandler, AceMode, AceTheme, NewLineMode};

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid editor configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Option values applied when the editor is created.
///
/// # Examples
///
/// ```
/// use ace_view::EditorConfig;
///
/// let config = EditorConfig::from_json(r#"{ "tabSize": 2, "mode": "rust" }"#);
/// assert!(config.is_err());
///
/// let config = EditorConfig::from_json(r#"{ "tabSize": 2, "mode": "python" }"#).unwrap();
/// assert_eq!(config.tab_size, 2);
/// assert_eq!(config.font_size, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub mode: AceMode,
    pub theme: AceTheme,
    pub keyboard_handler: AceKeyboardHandler,
    pub tab_size: usize,
    pub use_soft_tabs: bool,
    pub new_line_mode: NewLineMode,
    /// Soft wrap
    pub wrap: bool,
    pub wrap_behaviours_enabled: bool,
    pub show_invisibles: bool,
    pub read_only: bool,
    pub show_fold_widgets: bool,
    pub fade_fold_widgets: bool,
    pub highlight_active_line: bool,
    pub highlight_gutter_line: bool,
    pub highlight_selected_word: bool,
    pub display_indent_guides: bool,
    pub animated_scroll: bool,
    pub scroll_speed: usize,
    pub print_margin_column: usize,
    pub show_print_margin: bool,
    pub font_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    pub show_line_numbers: bool,
    pub show_gutter: bool,
    pub enable_basic_autocompletion: bool,
    pub enable_live_autocompletion: bool,
    pub enable_snippets: bool,
    pub emmet: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            mode: AceMode::Text,
            theme: AceTheme::Textmate,
            keyboard_handler: AceKeyboardHandler::Ace,
            tab_size: 4,
            use_soft_tabs: true,
            new_line_mode: NewLineMode::Auto,
            wrap: false,
            wrap_behaviours_enabled: true,
            show_invisibles: false,
            read_only: false,
            show_fold_widgets: true,
            fade_fold_widgets: false,
            highlight_active_line: true,
            highlight_gutter_line: true,
            highlight_selected_word: true,
            display_indent_guides: true,
            animated_scroll: false,
            scroll_speed: 2,
            print_margin_column: 80,
            show_print_margin: true,
            font_size: 12,
            font_family: None,
            show_line_numbers: true,
            show_gutter: true,
            enable_basic_autocompletion: false,
            enable_live_autocompletion: false,
            enable_snippets: false,
            emmet: false,
        }
    }
}

impl EditorConfig {
    /// Parses a configuration; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON or unknown catalog
    /// names.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The `setOptions` payload, with mode and theme as resource paths.
    ///
    /// The keyboard handler is not an option; see
    /// [`bootstrap_script`](Self::bootstrap_script).
    #[must_use]
    pub fn to_options(&self) -> Map<String, Value> {
        let mut options = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        options.remove("keyboardHandler");
        options.insert("mode".to_string(), Value::String(self.mode.resource_path()));
        match self.theme.resource_path() {
            Some(path) => options.insert("theme".to_string(), Value::String(path)),
            None => options.remove("theme"),
        };
        options
    }

    /// Script applying this configuration to the global `editor`.
    #[must_use]
    pub fn bootstrap_script(&self) -> String {
        format!(
            "editor.setOptions({});editor.setKeyboardHandler({});",
            Value::Object(self.to_options()),
            self.keyboard_handler.command()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_widget_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.tab_size, 4);
        assert_eq!(config.font_size, 12);
        assert_eq!(config.print_margin_column, 80);
        assert_eq!(config.scroll_speed, 2);
        assert_eq!(config.keyboard_handler, AceKeyboardHandler::Ace);
        assert_eq!(config.font_family, None);
    }

    #[test]
    fn test_options_use_ace_names_and_paths() {
        let options = EditorConfig::default().to_options();
        assert_eq!(options.get("mode"), Some(&Value::from("ace/mode/text")));
        assert_eq!(options.get("theme"), Some(&Value::from("ace/theme/textmate")));
        assert_eq!(options.get("tabSize"), Some(&Value::from(4)));
        assert_eq!(options.get("newLineMode"), Some(&Value::from("auto")));
        assert_eq!(options.get("enableBasicAutocompletion"), Some(&Value::from(false)));
        assert!(!options.contains_key("keyboardHandler"));
        assert!(!options.contains_key("fontFamily"));
    }

    #[test]
    fn test_none_theme_is_left_out() {
        let config = EditorConfig { theme: AceTheme::None, ..EditorConfig::default() };
        assert!(!config.to_options().contains_key("theme"));
    }

    #[test]
    fn test_from_json_keeps_defaults() {
        let config = EditorConfig::from_json(
            r#"{"theme": "ace/theme/monokai", "keyboardHandler": "Vim", "fontFamily": "Hack"}"#,
        )
        .unwrap_or_default();
        assert_eq!(config.theme, AceTheme::Monokai);
        assert_eq!(config.keyboard_handler, AceKeyboardHandler::Vim);
        assert_eq!(config.font_family.as_deref(), Some("Hack"));
        assert_eq!(config.tab_size, 4);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(EditorConfig::from_json("{ tabSize"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_bootstrap_script_sets_handler() {
        let config = EditorConfig { keyboard_handler: AceKeyboardHandler::Emacs, ..EditorConfig::default() };
        let script = config.bootstrap_script();
        assert!(script.starts_with("editor.setOptions({"));
        assert!(script.ends_with("editor.setKeyboardHandler(require(\"ace/keyboard/emacs\").handler);"));
    }
}
