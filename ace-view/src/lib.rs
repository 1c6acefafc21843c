//! A native bridge to the Ace code editor running inside a web view.
//!
//! The editor itself lives in a page ([`editor_page`]) loaded by the host.
//! This crate drives it through a [`ScriptEngine`]: typed facades over
//! the page's `editor` and session objects, a view that reports text
//! changes as notifications, and catalogs of the modes, themes and
//! keyboard handlers Ace ships with.
//!
//! # Features
//!
//! - **Typed accessors**: every editor and session option as a Rust getter and setter
//! - **Catalogs**: [`AceMode`], [`AceTheme`] and [`AceKeyboardHandler`] with Ace's resource names
//! - **Change notifications**: [`TEXT_DID_END_EDITING`] through a [`NotificationCenter`]
//! - **Range translation**: flat character ranges to Ace row/column ranges
//! - **Search**: find-all and replace-all with Ace's search options
//! - **Headless engine**: an in-process model of the page for tests and tools
//! - **Web engine**: a `wasm-bindgen` engine behind the `web` feature
//! - **Exception routing**: script failures go to one replaceable handler
//!
//! # Example
//!
//! ```no_run
//! use ace_view::{AceMode, AceTheme, AceView, HeadlessEngine, ViewError};
//!
//! fn configure(view: &AceView) -> Result<(), ViewError> {
//!     view.set_mode(AceMode::Python)?;
//!     view.set_theme(AceTheme::Monokai)?;
//!     view.set_show_invisibles(true)?;
//!     view.set_string("print(42)")?;
//!     Ok(())
//! }
//!
//! let view = AceView::new();
//! view.on_text_change(|notification| println!("{} changed", notification.sender));
//! view.did_finish_load(Box::new(HeadlessEngine::new()));
//! configure(&view).unwrap();
//! ```
//!
//! # Loading the page
//!
//! Hosts embed the bundled template with the directory holding `ace.js`,
//! then hand the page's engine to the view once it has loaded:
//!
//! ```no_run
//! use ace_view::{EditorConfig, configured_editor_page};
//!
//! let config = EditorConfig::from_json(r#"{ "tabSize": 2 }"#).unwrap();
//! let html = configured_editor_page("/usr/share/ace/src-min", &config);
//! // web_view.load_html(&html);
//! ```
//!
//! # Ranges
//!
//! Native text ranges count characters from the start of the document.
//! [`ace_range`] turns them into the row/column form Ace expects:
//!
//! ```
//! use ace_view::{Position, TextRange, ace_range};
//!
//! let range = ace_range(TextRange::new(4, 3), "one\ntwo\n").unwrap();
//! assert_eq!(range.start, Position::new(1, 0));
//! assert_eq!(range.end, Position::new(1, 3));
//! ```
//!
//! # Exceptions
//!
//! Failed script calls never panic and never surface as `Err`. The bridge
//! passes them to the context's exception handler and the call reads as
//! `undefined`, which the facades turn into defaults:
//!
//! ```
//! use ace_view::{AceContext, HeadlessEngine, ScriptException};
//!
//! let context = AceContext::new(Box::new(HeadlessEngine::new()));
//! context.set_exception_handler(Box::new(|exception: &ScriptException| {
//!     eprintln!("{exception}");
//! }));
//! assert!(context.evaluate("editor.frobnicate();").is_undefined());
//! ```

mod bridge;
mod catalog;
mod config;
mod context;
mod editor;
mod engine;
mod notification;
mod range;
mod resources;
mod search;
mod session;
mod view;

pub use bridge::{
    Bridge, BridgedObject, ExceptionHandler, HOST_GLOBAL, HostExports, ObjectRef, Operation,
    RemoteObject, ScriptEngine, ScriptException, ScriptResult, ScriptValue,
};
pub use catalog::{AceKeyboardHandler, AceMode, AceTheme, CatalogError, NewLineMode};
pub use config::{ConfigError, EditorConfig};
pub use context::AceContext;
pub use editor::{DEFAULT_FONT_FAMILY, Editor};
pub use engine::{EDITOR, HeadlessEngine, SESSION};
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use engine::WebEngine;
pub use notification::{Notification, NotificationCenter, ObserverToken, TEXT_DID_END_EDITING, ViewId};
pub use range::{AceRange, Position, RangeError, TextRange, ace_range, script_range};
pub use resources::{
    JAVASCRIPT_DIRECTORY_PLACEHOLDER, PAGE_TEMPLATE, configured_editor_page, editor_page,
};
pub use search::{SearchMatch, SearchOptions};
pub use session::{Session, WrapLimit};
pub use view::{AceView, AceViewDelegate, ViewError};
