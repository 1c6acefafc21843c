//! The page template real hosts load into their web view.

use crate::config::EditorConfig;

/// Placeholder for the directory holding `ace.js` and its modules.
pub const JAVASCRIPT_DIRECTORY_PLACEHOLDER: &str = "___ACE_VIEW_JAVASCRIPT_DIRECTORY___";

/// The unexpanded page template.
///
/// It defines the globals the bridge relies on: `editor`, `Range`,
/// `Search`, `reportChanges` and `focusEditor`, and forwards Ace's change
/// events to the `ACEView` host object while `reportChanges` is set.
pub const PAGE_TEMPLATE: &str = include_str!("../resources/index.html");

/// The page with `javascript_directory` substituted for the placeholder.
///
/// # Examples
///
/// ```
/// let page = ace_view::editor_page("/opt/ace/src-min");
/// assert!(page.contains(r#"src="/opt/ace/src-min/ace.js""#));
/// ```
#[must_use]
pub fn editor_page(javascript_directory: &str) -> String {
    let directory = javascript_directory.trim_end_matches('/');
    PAGE_TEMPLATE.replace(JAVASCRIPT_DIRECTORY_PLACEHOLDER, directory)
}

/// [`editor_page`] with `config` applied once the editor exists.
#[must_use]
pub fn configured_editor_page(javascript_directory: &str, config: &EditorConfig) -> String {
    let bootstrap = format!("<script type=\"text/javascript\">{}</script>\n</body>", config.bootstrap_script());
    editor_page(javascript_directory).replacen("</body>", &bootstrap, 1)
}
