//! Remote method names, keyed by the accessor that calls them.

use std::fmt;

/// A method on a script-side editor or session object.
///
/// Each facade accessor names its operation here instead of deriving the
/// remote name from its own identifier, so renaming a Rust method never
/// changes what is called on the script side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Shared by editor and session
    GetOption,
    SetOptions,

    // Editor
    GetValue,
    SetValue,
    ClearSelection,
    MoveCursorTo,
    GetSession,
    SetTheme,
    GetWrapBehavioursEnabled,
    SetWrapBehavioursEnabled,
    GetShowInvisibles,
    SetShowInvisibles,
    GetReadOnly,
    SetReadOnly,
    GetShowFoldWidgets,
    SetShowFoldWidgets,
    GetFadeFoldWidgets,
    SetFadeFoldWidgets,
    GetHighlightActiveLine,
    SetHighlightActiveLine,
    GetHighlightGutterLine,
    SetHighlightGutterLine,
    GetHighlightSelectedWord,
    SetHighlightSelectedWord,
    GetDisplayIndentGuides,
    SetDisplayIndentGuides,
    GetAnimatedScroll,
    SetAnimatedScroll,
    GetScrollSpeed,
    SetScrollSpeed,
    GetKeyboardHandler,
    GetPrintMarginColumn,
    SetPrintMarginColumn,
    GetShowPrintMargin,
    SetShowPrintMargin,
    GetFontSize,
    SetFontSize,
    GoToLine,
    Focus,
    CenterSelection,
    ReplaceAll,

    // Session
    SetMode,
    GetUseWrapMode,
    SetUseWrapMode,
    GetWrapLimitRange,
    SetWrapLimitRange,
    GetLength,
    GetLine,
    GetNewLineMode,
    SetNewLineMode,
    GetUseSoftTabs,
    SetUseSoftTabs,
    GetTabSize,
    SetTabSize,
}

impl Operation {
    /// The method name invoked on the script object.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetOption => "getOption",
            Self::SetOptions => "setOptions",
            Self::GetValue => "getValue",
            Self::SetValue => "setValue",
            Self::ClearSelection => "clearSelection",
            Self::MoveCursorTo => "moveCursorTo",
            Self::GetSession => "getSession",
            Self::SetTheme => "setTheme",
            Self::GetWrapBehavioursEnabled => "getWrapBehavioursEnabled",
            Self::SetWrapBehavioursEnabled => "setWrapBehavioursEnabled",
            Self::GetShowInvisibles => "getShowInvisibles",
            Self::SetShowInvisibles => "setShowInvisibles",
            Self::GetReadOnly => "getReadOnly",
            Self::SetReadOnly => "setReadOnly",
            Self::GetShowFoldWidgets => "getShowFoldWidgets",
            Self::SetShowFoldWidgets => "setShowFoldWidgets",
            Self::GetFadeFoldWidgets => "getFadeFoldWidgets",
            Self::SetFadeFoldWidgets => "setFadeFoldWidgets",
            Self::GetHighlightActiveLine => "getHighlightActiveLine",
            Self::SetHighlightActiveLine => "setHighlightActiveLine",
            Self::GetHighlightGutterLine => "getHighlightGutterLine",
            Self::SetHighlightGutterLine => "setHighlightGutterLine",
            Self::GetHighlightSelectedWord => "getHighlightSelectedWord",
            Self::SetHighlightSelectedWord => "setHighlightSelectedWord",
            Self::GetDisplayIndentGuides => "getDisplayIndentGuides",
            Self::SetDisplayIndentGuides => "setDisplayIndentGuides",
            Self::GetAnimatedScroll => "getAnimatedScroll",
            Self::SetAnimatedScroll => "setAnimatedScroll",
            Self::GetScrollSpeed => "getScrollSpeed",
            Self::SetScrollSpeed => "setScrollSpeed",
            Self::GetKeyboardHandler => "getKeyboardHandler",
            Self::GetPrintMarginColumn => "getPrintMarginColumn",
            Self::SetPrintMarginColumn => "setPrintMarginColumn",
            Self::GetShowPrintMargin => "getShowPrintMargin",
            Self::SetShowPrintMargin => "setShowPrintMargin",
            Self::GetFontSize => "getFontSize",
            Self::SetFontSize => "setFontSize",
            Self::GoToLine => "gotoLine",
            Self::Focus => "focus",
            Self::CenterSelection => "centerSelection",
            Self::ReplaceAll => "replaceAll",
            Self::SetMode => "setMode",
            Self::GetUseWrapMode => "getUseWrapMode",
            Self::SetUseWrapMode => "setUseWrapMode",
            Self::GetWrapLimitRange => "getWrapLimitRange",
            Self::SetWrapLimitRange => "setWrapLimitRange",
            Self::GetLength => "getLength",
            Self::GetLine => "getLine",
            Self::GetNewLineMode => "getNewLineMode",
            Self::SetNewLineMode => "setNewLineMode",
            Self::GetUseSoftTabs => "getUseSoftTabs",
            Self::SetUseSoftTabs => "setUseSoftTabs",
            Self::GetTabSize => "getTabSize",
            Self::SetTabSize => "setTabSize",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_script_methods() {
        assert_eq!(Operation::GetTabSize.name(), "getTabSize");
        assert_eq!(Operation::SetWrapLimitRange.name(), "setWrapLimitRange");
        assert_eq!(Operation::GoToLine.name(), "gotoLine");
        assert_eq!(Operation::GetOption.to_string(), "getOption");
    }
}
