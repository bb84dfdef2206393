//! scrollgrid - aligned multi-section scroll grids for the web
//!
//! Keeps the header, body and footer of a table grid aligned while each
//! scrolls independently:
//! - Shrink columns sized to the widest natural content across all sections
//! - Vertical scrollbars forced on every section when any one needs one
//! - One shared column group so widths stay pixel-identical
//! - Re-sizing on mount, on relevant configuration changes and on resize
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { ScrollGridView } from 'scrollgrid';
//! await init();
//! const view = new ScrollGridView(container, JSON.stringify(config));
//! view.resize();
//! ```
//!
//! # Usage (Rust)
//!
//! Implement [`ScrollerViewport`] and [`ShrinkMeasure`] for the host's
//! scroller and element types, then drive a [`ScrollGrid`] through its
//! lifecycle methods.

// Configuration and sizing core
pub mod context;
pub mod error;
pub mod grid;
pub mod layout;
pub mod registry;
pub mod render;
pub mod scroller;
pub mod sim;
pub mod types;

// DOM adapter (browser only)
#[cfg(target_arch = "wasm32")]
pub mod dom;

use wasm_bindgen::prelude::*;

pub use context::{LayoutContext, ListenerId};
pub use error::{Result, ScrollGridError};
pub use grid::{Phase, ScrollGrid, SizingOutcome};
pub use layout::LayoutState;
pub use registry::{ElementRef, RefRegistry};
pub use render::{GridRender, SectionRender};
pub use scroller::{Axis, Overflow, ScrollerConfig, ScrollerViewport, ShrinkMeasure};
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use dom::ScrollGridView;

/// Validate a JSON grid configuration and return it normalized
///
/// # Errors
/// Returns an error if the configuration is not valid JSON or does not
/// describe a valid grid.
#[wasm_bindgen]
pub fn normalize_config(json: &str) -> std::result::Result<String, JsValue> {
    let props: GridProps<()> =
        GridProps::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&props)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
