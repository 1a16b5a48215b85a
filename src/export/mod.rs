//! Email Export Module for RichCopy
//!
//! Turns panel content into clipboard-ready HTML and plain text for email
//! clients, and publishes it to the system clipboard.
//!
//! # Architecture
//!
//! - `options.rs` - Export configuration (font stack, color mode)
//! - `html.rs` - Inline-styled markup and the email container
//! - `plain_text.rs` - Rendered-text reading of markup
//! - `email.rs` - The HTML + plain text export pair
//! - `clipboard.rs` - Clipboard backends and the publisher

pub mod clipboard;
pub mod email;
pub mod html;
pub mod options;
pub mod plain_text;

pub use clipboard::{ClipboardPublisher, CopyOutcome};
pub use options::{ColorMode, ExportOptions};
