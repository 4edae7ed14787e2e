//! Unwrap result export formats.
//!
//! This module provides exporters for JSON, OBJ and a PNG layout preview.

pub mod json;
pub mod obj;
pub mod preview;

pub use json::export_json;
pub use obj::export_obj;
pub use preview::{render_preview, render_preview_png};
