//! Closed catalogs of Ace syntax modes, color themes and keyboard handlers.
//!
//! Every catalog keeps three parallel tables: the canonical variant order
//! (`ALL`), the wire identifier used to address the resource inside the
//! script environment, and a human readable label. The tables are fixed-size
//! arrays of the same length, so a missing entry is a compile error, and a
//! variant's discriminant is its index into all three.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Marker appended to a mode path when the mode was set in inline form.
const INLINE_SUFFIX: &str = "-inline";

/// Lookup failures for the catalogs that have no fallback value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown Ace mode: {0:?}")]
    UnknownMode(String),
    #[error("unknown Ace keyboard handler command: {0:?}")]
    UnknownKeyboardHandler(String),
}

/// The Ace syntax highlighting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AceMode {
    AsciiDoc,
    C9Search,
    Cpp,
    Clojure,
    Coffee,
    ColdFusion,
    CSharp,
    Css,
    Diff,
    Glsl,
    Golang,
    Groovy,
    Haxe,
    Html,
    Jade,
    Java,
    JavaScript,
    Json,
    Jsp,
    Jsx,
    Latex,
    Less,
    Liquid,
    Lua,
    Luapage,
    Markdown,
    OCaml,
    Perl,
    PgSql,
    Php,
    Powershell,
    Python,
    ObjectiveC,
    Ruby,
    Scad,
    Scala,
    Scss,
    Sh,
    Sql,
    Svg,
    Swift,
    Tcl,
    Text,
    Textile,
    Typescript,
    Xml,
    XQuery,
    Yaml,
}

impl AceMode {
    /// Every mode, in canonical order.
    pub const ALL: [AceMode; 48] = [
        Self::AsciiDoc,
        Self::C9Search,
        Self::Cpp,
        Self::Clojure,
        Self::Coffee,
        Self::ColdFusion,
        Self::CSharp,
        Self::Css,
        Self::Diff,
        Self::Glsl,
        Self::Golang,
        Self::Groovy,
        Self::Haxe,
        Self::Html,
        Self::Jade,
        Self::Java,
        Self::JavaScript,
        Self::Json,
        Self::Jsp,
        Self::Jsx,
        Self::Latex,
        Self::Less,
        Self::Liquid,
        Self::Lua,
        Self::Luapage,
        Self::Markdown,
        Self::OCaml,
        Self::Perl,
        Self::PgSql,
        Self::Php,
        Self::Powershell,
        Self::Python,
        Self::ObjectiveC,
        Self::Ruby,
        Self::Scad,
        Self::Scala,
        Self::Scss,
        Self::Sh,
        Self::Sql,
        Self::Svg,
        Self::Swift,
        Self::Tcl,
        Self::Text,
        Self::Textile,
        Self::Typescript,
        Self::Xml,
        Self::XQuery,
        Self::Yaml,
    ];

    /// Wire identifiers, index-aligned with [`AceMode::ALL`].
    pub const WIRE_NAMES: [&'static str; 48] = [
        "asciidoc",
        "c9search",
        "c_cpp",
        "clojure",
        "coffee",
        "coldfusion",
        "csharp",
        "css",
        "diff",
        "glsl",
        "golang",
        "groovy",
        "haxe",
        "html",
        "jade",
        "java",
        "javascript",
        "json",
        "jsp",
        "jsx",
        "latex",
        "less",
        "liquid",
        "lua",
        "luapage",
        "markdown",
        "ocaml",
        "perl",
        "pgsql",
        "php",
        "powershell",
        "python",
        "objectivec",
        "ruby",
        "scad",
        "scala",
        "scss",
        "sh",
        "sql",
        "svg",
        "swift",
        "tcl",
        "text",
        "textile",
        "typescript",
        "xml",
        "xquery",
        "yaml",
    ];

    /// Display labels, index-aligned with [`AceMode::ALL`].
    pub const HUMAN_NAMES: [&'static str; 48] = [
        "ASCII Doc",
        "C9 Search",
        "C++",
        "Clojure",
        "Coffee",
        "ColdFusion",
        "C#",
        "CSS",
        "Diff",
        "GLSL",
        "Go",
        "Groovy",
        "Haxe",
        "HTML",
        "Jade",
        "Java",
        "JavaScript",
        "JSON",
        "JSP",
        "JSX",
        "Latex",
        "LESS",
        "Liquid",
        "Lua",
        "Luapage",
        "Markdown",
        "OCaml",
        "Perl",
        "PGSQL",
        "PHP",
        "Powershell",
        "Python",
        "Objective-C",
        "Ruby",
        "SCAD",
        "Scala",
        "SCSS",
        "SH",
        "SQL",
        "SVG",
        "Swift",
        "Tcl",
        "Text",
        "Textile",
        "Typescript",
        "XML",
        "XQuery",
        "YAML",
    ];

    /// The identifier Ace uses for this mode, e.g. `"c_cpp"`.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        Self::WIRE_NAMES[self as usize]
    }

    /// The label shown to users, e.g. `"C++"`.
    #[must_use]
    pub const fn human_name(self) -> &'static str {
        Self::HUMAN_NAMES[self as usize]
    }

    /// The script resource path, e.g. `"ace/mode/c_cpp"`.
    #[must_use]
    pub fn resource_path(self) -> String {
        format!("ace/mode/{}", self.wire_name())
    }

    /// Resolves a wire identifier, ignoring a trailing `-inline` marker.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownMode`] when the name is not in the
    /// catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// use ace_view::AceMode;
    ///
    /// assert_eq!(AceMode::from_wire_name("php-inline"), Ok(AceMode::Php));
    /// assert_eq!(AceMode::from_wire_name("c_cpp"), Ok(AceMode::Cpp));
    /// ```
    pub fn from_wire_name(name: &str) -> Result<Self, CatalogError> {
        let name = name.strip_suffix(INLINE_SUFFIX).unwrap_or(name);
        Self::WIRE_NAMES
            .iter()
            .position(|wire| *wire == name)
            .map(|index| Self::ALL[index])
            .ok_or_else(|| CatalogError::UnknownMode(name.to_string()))
    }
}

impl FromStr for AceMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire_name(s)
    }
}

impl fmt::Display for AceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.human_name())
    }
}

/// The Ace color theme.
///
/// [`AceTheme::None`] stands for "no known theme". It is not part of the
/// wire table: any unrecognised theme name resolves to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AceTheme {
    Ambiance,
    Chrome,
    Clouds,
    CloudsMidnight,
    Cobalt,
    CrimsonEditor,
    Dawn,
    Dreamweaver,
    Eclipse,
    Github,
    IdleFingers,
    Merbivore,
    MerbivoreSoft,
    MonoIndustrial,
    Monokai,
    PastelOnDark,
    SolarizedDark,
    SolarizedLight,
    Textmate,
    Tomorrow,
    TomorrowNight,
    TomorrowNightBlue,
    TomorrowNightBright,
    TomorrowNightEighties,
    Twilight,
    VibrantInk,
    Xcode,
    #[default]
    None,
}

impl AceTheme {
    /// Every named theme, in canonical order. Excludes [`AceTheme::None`].
    pub const ALL: [AceTheme; 27] = [
        Self::Ambiance,
        Self::Chrome,
        Self::Clouds,
        Self::CloudsMidnight,
        Self::Cobalt,
        Self::CrimsonEditor,
        Self::Dawn,
        Self::Dreamweaver,
        Self::Eclipse,
        Self::Github,
        Self::IdleFingers,
        Self::Merbivore,
        Self::MerbivoreSoft,
        Self::MonoIndustrial,
        Self::Monokai,
        Self::PastelOnDark,
        Self::SolarizedDark,
        Self::SolarizedLight,
        Self::Textmate,
        Self::Tomorrow,
        Self::TomorrowNight,
        Self::TomorrowNightBlue,
        Self::TomorrowNightBright,
        Self::TomorrowNightEighties,
        Self::Twilight,
        Self::VibrantInk,
        Self::Xcode,
    ];

    /// Wire identifiers, index-aligned with [`AceTheme::ALL`].
    pub const WIRE_NAMES: [&'static str; 27] = [
        "ambiance",
        "chrome",
        "clouds",
        "clouds_midnight",
        "cobalt",
        "crimson_editor",
        "dawn",
        "dreamweaver",
        "eclipse",
        "github",
        "idle_fingers",
        "merbivore",
        "merbivore_soft",
        "mono_industrial",
        "monokai",
        "pastel_on_dark",
        "solarized_dark",
        "solarized_light",
        "textmate",
        "tomorrow",
        "tomorrow_night",
        "tomorrow_night_blue",
        "tomorrow_night_bright",
        "tomorrow_night_eighties",
        "twilight",
        "vibrant_ink",
        "xcode",
    ];

    /// Display labels, index-aligned with [`AceTheme::ALL`].
    pub const HUMAN_NAMES: [&'static str; 27] = [
        "Ambiance",
        "Chrome",
        "Clouds",
        "Clouds Midnight",
        "Cobalt",
        "Crimson Editor",
        "Dawn",
        "Dreamweaver",
        "Eclipse",
        "Github",
        "Idle Fingers",
        "Merbivore",
        "Merbivore Soft",
        "Mono Industrial",
        "Monokai",
        "Pastel on Dark",
        "Solarized Dark",
        "Solarized Light",
        "Textmate",
        "Tomorrow",
        "Tomorrow Night",
        "Tomorrow Night Blue",
        "Tomorrow Night Bright",
        "Tomorrow Night Eighties",
        "Twilight",
        "Vibrant Ink",
        "Xcode",
    ];

    /// Name reported by [`AceTheme::None`] for both wire and human forms.
    pub const NONE_NAME: &'static str = "None";

    /// The identifier Ace uses for this theme, e.g. `"tomorrow_night"`.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::None => Self::NONE_NAME,
            named => Self::WIRE_NAMES[named as usize],
        }
    }

    /// The label shown to users, e.g. `"Tomorrow Night"`.
    #[must_use]
    pub const fn human_name(self) -> &'static str {
        match self {
            Self::None => Self::NONE_NAME,
            named => Self::HUMAN_NAMES[named as usize],
        }
    }

    /// The script resource path, or `None` for [`AceTheme::None`].
    #[must_use]
    pub fn resource_path(self) -> Option<String> {
        match self {
            Self::None => None,
            named => Some(format!("ace/theme/{}", named.wire_name())),
        }
    }

    /// Whether Ace flags the theme `isDark`.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(
            self,
            Self::Ambiance
                | Self::CloudsMidnight
                | Self::Cobalt
                | Self::IdleFingers
                | Self::Merbivore
                | Self::MerbivoreSoft
                | Self::MonoIndustrial
                | Self::Monokai
                | Self::PastelOnDark
                | Self::SolarizedDark
                | Self::TomorrowNight
                | Self::TomorrowNightBlue
                | Self::TomorrowNightBright
                | Self::TomorrowNightEighties
                | Self::Twilight
                | Self::VibrantInk
        )
    }

    /// Resolves a wire identifier. Unknown names yield [`AceTheme::None`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ace_view::AceTheme;
    ///
    /// assert_eq!(AceTheme::from_wire_name("monokai"), AceTheme::Monokai);
    /// assert_eq!(AceTheme::from_wire_name("not-a-real-theme"), AceTheme::None);
    /// ```
    #[must_use]
    pub fn from_wire_name(name: &str) -> Self {
        Self::WIRE_NAMES
            .iter()
            .position(|wire| *wire == name)
            .map_or(Self::None, |index| Self::ALL[index])
    }
}

impl fmt::Display for AceTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.human_name())
    }
}

/// The keyboard handling profile of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AceKeyboardHandler {
    #[default]
    Ace,
    Emacs,
    Vim,
}

impl AceKeyboardHandler {
    /// Every handler, in canonical order.
    pub const ALL: [AceKeyboardHandler; 3] = [Self::Ace, Self::Emacs, Self::Vim];

    /// Script expressions resolving each handler, index-aligned with
    /// [`AceKeyboardHandler::ALL`].
    pub const COMMANDS: [&'static str; 3] = [
        "null",
        "require(\"ace/keyboard/emacs\").handler",
        "require(\"ace/keyboard/vim\").handler",
    ];

    /// Display labels, index-aligned with [`AceKeyboardHandler::ALL`].
    pub const HUMAN_NAMES: [&'static str; 3] = ["Ace", "Emacs", "Vim"];

    /// The script expression that resolves this handler.
    #[must_use]
    pub const fn command(self) -> &'static str {
        Self::COMMANDS[self as usize]
    }

    /// The label shown to users.
    #[must_use]
    pub const fn human_name(self) -> &'static str {
        Self::HUMAN_NAMES[self as usize]
    }

    /// The script module id the handler object reports as `$id`.
    ///
    /// The default handler is built into the editor and has no module.
    #[must_use]
    pub const fn module_id(self) -> Option<&'static str> {
        match self {
            Self::Ace => None,
            Self::Emacs => Some("ace/keyboard/emacs"),
            Self::Vim => Some("ace/keyboard/vim"),
        }
    }

    /// Resolves one of the three known command expressions.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownKeyboardHandler`] for anything else.
    pub fn from_command(command: &str) -> Result<Self, CatalogError> {
        Self::COMMANDS
            .iter()
            .position(|known| *known == command)
            .map(|index| Self::ALL[index])
            .ok_or_else(|| CatalogError::UnknownKeyboardHandler(command.to_string()))
    }

    /// Maps a handler object's `$id` back to the catalog.
    ///
    /// Anything that is not one of the bundled handler modules is the
    /// default handler.
    #[must_use]
    pub fn from_module_id(id: Option<&str>) -> Self {
        Self::ALL
            .into_iter()
            .find(|handler| handler.module_id().is_some() && handler.module_id() == id)
            .unwrap_or(Self::Ace)
    }
}

impl fmt::Display for AceKeyboardHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.human_name())
    }
}

/// How the document terminates lines it inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewLineMode {
    /// Follow the first line terminator found in the document
    #[default]
    Auto,
    Unix,
    Windows,
}

impl NewLineMode {
    pub const ALL: [NewLineMode; 3] = [Self::Auto, Self::Unix, Self::Windows];

    /// The identifier Ace uses for this mode.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Unix => "unix",
            Self::Windows => "windows",
        }
    }

    /// Resolves a wire identifier.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.wire_name() == name)
    }
}

impl fmt::Display for NewLineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl Serialize for AceMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for AceMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        let name = name.rsplit('/').next().unwrap_or(&name);
        Self::from_wire_name(name).map_err(serde::de::Error::custom)
    }
}

impl Serialize for AceTheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for AceTheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_wire_name(name.rsplit('/').next().unwrap_or(&name)))
    }
}

impl Serialize for AceKeyboardHandler {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.human_name())
    }
}

impl<'de> Deserialize<'de> for AceKeyboardHandler {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::ALL
            .into_iter()
            .find(|handler| handler.human_name().eq_ignore_ascii_case(&name))
            .or_else(|| Self::from_command(&name).ok())
            .ok_or_else(|| {
                serde::de::Error::custom(CatalogError::UnknownKeyboardHandler(name.clone()))
            })
    }
}
