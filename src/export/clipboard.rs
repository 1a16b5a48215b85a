//! Clipboard Publishing
//!
//! Places a panel's export on the system clipboard. The primary path writes
//! one payload with an HTML and a plain-text part. When that is unsupported
//! or fails, the whole region is selected in the page selection and copied
//! through the legacy selection copy. Every publish reports exactly one
//! notification and never returns an error.

use super::email::{export_document, EmailExport};
use super::options::ExportOptions;
use crate::content::{CharRange, PageSelection, PanelId, RichDocument};
use crate::ui::Notify;
use arboard::Clipboard;
use log::{debug, info, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// The backend cannot write this kind of payload
    Unsupported,
    /// Failed to access clipboard
    AccessError(String),
    /// Failed to set clipboard content
    WriteError(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Unsupported => write!(f, "Clipboard write not supported"),
            ClipboardError::AccessError(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::WriteError(msg) => write!(f, "Clipboard write error: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        match err {
            arboard::Error::ClipboardNotSupported => ClipboardError::Unsupported,
            err => ClipboardError::WriteError(err.to_string()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backends
// ─────────────────────────────────────────────────────────────────────────────

/// A platform clipboard.
pub trait ClipboardBackend {
    /// Whether one write can carry both HTML and plain text.
    fn supports_rich_write(&self) -> bool;

    /// Write both representations in a single payload.
    fn write_rich(&mut self, payload: &EmailExport) -> Result<(), ClipboardError>;

    /// Copy the current selection, whose content is `selected`.
    fn copy_selection(&mut self, selected: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard, through arboard.
///
/// The handle is opened on first use and kept: on X11 the clipboard content
/// lives only as long as its owner.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn open(&mut self) -> Result<&mut Clipboard, ClipboardError> {
        if self.clipboard.is_none() {
            let clipboard =
                Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| ClipboardError::AccessError("clipboard unavailable".to_string()))
    }
}

impl ClipboardBackend for SystemClipboard {
    fn supports_rich_write(&self) -> bool {
        cfg!(any(target_os = "windows", target_os = "macos", target_os = "linux"))
    }

    fn write_rich(&mut self, payload: &EmailExport) -> Result<(), ClipboardError> {
        self.open()?
            .set_html(payload.html.as_str(), Some(payload.text.as_str()))?;
        Ok(())
    }

    fn copy_selection(&mut self, selected: &str) -> Result<(), ClipboardError> {
        self.open()?.set_text(selected)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Publisher
// ─────────────────────────────────────────────────────────────────────────────

pub const MSG_COPIED_RICH: &str = "Copied with formatting ✅";
pub const MSG_COPIED_PLAIN: &str = "Copied as plain text ✅";
pub const MSG_COPY_FAILED: &str = "Copy failed - try Ctrl/Cmd+C";

/// Which path a publish took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// HTML and plain text written together
    Rich,
    /// Copied through the selection fallback, as plain text only
    SelectionFallback,
    /// Nothing reached the clipboard
    Failed,
}

impl CopyOutcome {
    /// Notification shown for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            CopyOutcome::Rich => MSG_COPIED_RICH,
            CopyOutcome::SelectionFallback => MSG_COPIED_PLAIN,
            CopyOutcome::Failed => MSG_COPY_FAILED,
        }
    }
}

/// Publishes panel exports to a clipboard backend.
pub struct ClipboardPublisher {
    backend: Box<dyn ClipboardBackend>,
}

impl ClipboardPublisher {
    pub fn new(backend: Box<dyn ClipboardBackend>) -> Self {
        Self { backend }
    }

    /// Publisher on the system clipboard.
    pub fn system() -> Self {
        Self::new(Box::new(SystemClipboard::new()))
    }

    /// Copy `document` from region `owner` to the clipboard.
    ///
    /// The document is never modified. The page selection is cleared
    /// whenever the fallback path ran, whatever its result.
    pub fn publish(
        &mut self,
        owner: PanelId,
        document: &RichDocument,
        options: &ExportOptions,
        selection: &mut PageSelection,
        notify: &mut dyn Notify,
    ) -> CopyOutcome {
        let export = export_document(document, options);

        let outcome = match self.write_rich(&export) {
            Ok(()) => CopyOutcome::Rich,
            Err(e) => {
                debug!("Rich clipboard write unavailable for {}: {}", owner, e);
                self.copy_via_selection(owner, document, selection)
            }
        };

        match outcome {
            CopyOutcome::Failed => warn!("Copy from {} failed", owner),
            _ => info!("Copied {} ({:?})", owner, outcome),
        }
        notify.notify(outcome.message());
        outcome
    }

    fn write_rich(&mut self, export: &EmailExport) -> Result<(), ClipboardError> {
        if !self.backend.supports_rich_write() {
            return Err(ClipboardError::Unsupported);
        }
        self.backend.write_rich(export)
    }

    fn copy_via_selection(
        &mut self,
        owner: PanelId,
        document: &RichDocument,
        selection: &mut PageSelection,
    ) -> CopyOutcome {
        selection.select_all(owner, document.len_chars());
        let selected = selection
            .range_in(owner)
            .map(|range| selected_text(document, range))
            .unwrap_or_default();

        let result = self.backend.copy_selection(&selected);
        selection.clear();

        match result {
            Ok(()) => CopyOutcome::SelectionFallback,
            Err(e) => {
                warn!("Selection copy failed: {}", e);
                CopyOutcome::Failed
            }
        }
    }
}

fn selected_text(document: &RichDocument, range: CharRange) -> String {
    document
        .plain_text()
        .chars()
        .skip(range.start)
        .take(range.len())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Block, FontSize, Run, RunStyle};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorded {
        rich: Vec<EmailExport>,
        selections: Vec<String>,
    }

    struct FakeClipboard {
        rich_supported: bool,
        rich_fails: bool,
        selection_fails: bool,
        recorded: Rc<RefCell<Recorded>>,
    }

    impl FakeClipboard {
        fn new(rich_supported: bool, rich_fails: bool, selection_fails: bool) -> (Self, Rc<RefCell<Recorded>>) {
            let recorded = Rc::new(RefCell::new(Recorded::default()));
            let fake = Self {
                rich_supported,
                rich_fails,
                selection_fails,
                recorded: Rc::clone(&recorded),
            };
            (fake, recorded)
        }
    }

    impl ClipboardBackend for FakeClipboard {
        fn supports_rich_write(&self) -> bool {
            self.rich_supported
        }

        fn write_rich(&mut self, payload: &EmailExport) -> Result<(), ClipboardError> {
            if self.rich_fails {
                return Err(ClipboardError::WriteError("denied".to_string()));
            }
            self.recorded.borrow_mut().rich.push(payload.clone());
            Ok(())
        }

        fn copy_selection(&mut self, selected: &str) -> Result<(), ClipboardError> {
            if self.selection_fails {
                return Err(ClipboardError::AccessError("blocked".to_string()));
            }
            self.recorded.borrow_mut().selections.push(selected.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Vec<String>,
    }

    impl Notify for RecordingNotifier {
        fn notify(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    fn document() -> RichDocument {
        let style = RunStyle {
            bold: true,
            font_size: Some(FontSize::Px(18)),
            ..RunStyle::default()
        };
        RichDocument::new(vec![
            Block::paragraph(vec![Run::new("Hello", style), Run::plain(" there")]),
            Block::paragraph(vec![Run::plain("Bye")]),
        ])
    }

    fn publish(fake: FakeClipboard) -> (CopyOutcome, RecordingNotifier, PageSelection) {
        let mut publisher = ClipboardPublisher::new(Box::new(fake));
        let mut notifier = RecordingNotifier::default();
        let mut selection = PageSelection::new();
        selection.select(PanelId(0), CharRange::caret(2));
        let outcome = publisher.publish(
            PanelId(1),
            &document(),
            &ExportOptions::default(),
            &mut selection,
            &mut notifier,
        );
        (outcome, notifier, selection)
    }

    #[test]
    fn test_rich_write_carries_both_parts() {
        let (fake, recorded) = FakeClipboard::new(true, false, false);
        let (outcome, notifier, selection) = publish(fake);

        assert_eq!(outcome, CopyOutcome::Rich);
        assert_eq!(notifier.messages, vec![MSG_COPIED_RICH]);
        let recorded = recorded.borrow();
        assert_eq!(recorded.rich.len(), 1);
        assert!(recorded.rich[0]
            .html
            .contains("<span style=\"font-size:18px\"><b>Hello</b></span>"));
        assert_eq!(recorded.rich[0].text, "Hello there\nBye");
        assert!(recorded.selections.is_empty());
        // The rich path leaves the page selection alone
        assert!(!selection.is_empty());
    }

    #[test]
    fn test_unsupported_rich_write_falls_back_to_selection() {
        let (fake, recorded) = FakeClipboard::new(false, false, false);
        let (outcome, notifier, selection) = publish(fake);

        assert_eq!(outcome, CopyOutcome::SelectionFallback);
        assert_eq!(notifier.messages, vec![MSG_COPIED_PLAIN]);
        assert_eq!(recorded.borrow().selections, vec!["Hello there\nBye"]);
        assert!(recorded.borrow().rich.is_empty());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_failed_rich_write_falls_back_to_selection() {
        let (fake, recorded) = FakeClipboard::new(true, true, false);
        let (outcome, notifier, _) = publish(fake);

        assert_eq!(outcome, CopyOutcome::SelectionFallback);
        assert_eq!(notifier.messages, vec![MSG_COPIED_PLAIN]);
        assert_eq!(recorded.borrow().selections.len(), 1);
    }

    #[test]
    fn test_total_failure_notifies_once_and_clears_selection() {
        let (fake, recorded) = FakeClipboard::new(true, true, true);
        let (outcome, notifier, selection) = publish(fake);

        assert_eq!(outcome, CopyOutcome::Failed);
        assert_eq!(notifier.messages, vec![MSG_COPY_FAILED]);
        assert!(recorded.borrow().selections.is_empty());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_outcome_messages_name_what_was_copied() {
        assert!(CopyOutcome::Rich.message().contains("formatting"));
        assert!(CopyOutcome::SelectionFallback.message().contains("plain text"));
        assert_ne!(CopyOutcome::Rich.message(), CopyOutcome::SelectionFallback.message());
        assert!(CopyOutcome::Failed.message().contains("Ctrl/Cmd+C"));
    }

    #[test]
    fn test_clipboard_error_display() {
        let err = ClipboardError::AccessError("test".to_string());
        assert!(err.to_string().contains("test"));
        let err = ClipboardError::WriteError("write failed".to_string());
        assert!(err.to_string().contains("write failed"));
    }
}
