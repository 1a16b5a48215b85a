//! Character ranges and the page-wide selection.
//!
//! Every panel shares one selection resource, the same way a single text
//! selection exists per window. Formatting and the fallback copy path read and
//! reset it explicitly instead of relying on ambient state.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Character Range
// ─────────────────────────────────────────────────────────────────────────────

/// A range of character offsets into a document's text, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CharRange {
    pub start: usize,
    pub end: usize,
}

impl CharRange {
    /// Create a range from two offsets in either order.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A collapsed range (caret) at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether both ends fall inside a text of `len` characters.
    pub fn fits(&self, len: usize) -> bool {
        self.end <= len
    }

    /// Clamp both ends to `len`.
    pub fn clamp(self, len: usize) -> Self {
        Self {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Panel Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Zero-based identifier of an editable panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub usize);

impl PanelId {
    /// One-based number shown to the user.
    pub fn number(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Panel {}", self.number())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Page Selection
// ─────────────────────────────────────────────────────────────────────────────

/// The selection currently held by one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveSelection {
    owner: PanelId,
    range: CharRange,
}

/// The single selection shared by all panels.
///
/// At most one panel owns the selection at a time. A panel that does not own
/// it sees `None` from [`PageSelection::range_in`], which is what makes the
/// command executor take its focus path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSelection {
    active: Option<ActiveSelection>,
}

impl PageSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give the selection to `owner`.
    pub fn select(&mut self, owner: PanelId, range: CharRange) {
        self.active = Some(ActiveSelection { owner, range });
    }

    /// Select the entire content of a region holding `len` characters.
    pub fn select_all(&mut self, owner: PanelId, len: usize) {
        self.select(owner, CharRange::new(0, len));
    }

    /// The selected range, if `owner` holds the selection.
    pub fn range_in(&self, owner: PanelId) -> Option<CharRange> {
        self.active
            .filter(|active| active.owner == owner)
            .map(|active| active.range)
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
