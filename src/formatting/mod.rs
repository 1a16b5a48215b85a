//! Formatting operations for RichCopy panels
//!
//! # Architecture
//!
//! - `command.rs` - Formatting commands and the executor
//! - `size.rs` - Pixel to legacy size mapping and size normalization
//! - `color.rs` - Forced text color for email export

mod color;
mod command;
mod size;

pub use color::force_color;
pub use command::{execute, FormatCommand, FormatResult};
pub use size::{apply_font_size_px, legacy_bucket_px};
