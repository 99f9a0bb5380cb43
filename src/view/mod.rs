//! Output renderers for computed layouts.
//!
//! - [`json`] - machine-readable layout records
//! - [`preview`] - text rendering of the column through a ratatui buffer

pub mod json;
pub mod preview;

pub use json::{layout_records, render_json, LayoutRecord};
pub use preview::{buffer_to_string, render_preview, ColumnPreview};
