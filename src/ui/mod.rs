//! UI components for RichCopy
//!
//! This module contains the panel toolbar and the toast notification.

mod toast;
mod toolbar;

pub use toast::{Notify, Toast};
pub use toolbar::{FormattingState, Toolbar, ToolbarAction};
