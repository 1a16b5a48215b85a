//! Editor module for RichCopy
//!
//! This module contains the per-panel editing state and the rich text
//! editor widget that displays it.

mod panel;
mod widget;

pub use panel::Panel;
pub use widget::EditorWidget;
