//! [`ScriptEngine`](crate::ScriptEngine) implementations.

mod headless;
#[cfg(any(test, all(feature = "web", target_arch = "wasm32")))]
mod registry;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

pub use headless::{EDITOR, HeadlessEngine, SESSION};
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::WebEngine;
