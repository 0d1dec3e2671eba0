//! Schematic Editor WASM Module
//!
//! Renders a schematic editor's visual model as an SVG render tree and
//! imports gEDA GAF data into it.

pub mod api;
pub mod config;
pub mod context;
pub mod models;
pub mod parse;
pub mod renderers;
pub mod schematic;

// Re-export commonly used types
pub use config::{CanvasConfig, PageSize};
pub use context::{NameAllocator, SchematicContext};
pub use models::*;
pub use schematic::{GafSource, ImportSummary, Schematic, SchematicError};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if console_log::init_with_level(log::Level::Debug).is_err() {
            web_sys::console::warn_1(&"[WASM] logger already initialized".into());
        }
    }

    log::info!("Schematic editor WASM module initialized");
}
