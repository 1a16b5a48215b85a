//! Content model for RichCopy
//!
//! Each editable panel owns a [`RichDocument`]: a small, serializable tree of
//! blocks and styled runs. Formatting commands transform it functionally and
//! the export module renders it to email-safe markup.

mod document;
mod selection;

pub use document::*;
pub use selection::*;
