//! Editable panel state.
//!
//! A [`Panel`] owns one region's document and applies toolbar actions and
//! typing to it. Panels never hold the selection themselves: every operation
//! takes the shared [`PageSelection`] and claims it for the panel.

use crate::content::{
    Block, CharRange, Color, FontSize, PageSelection, PanelId, RichDocument, Run, RunStyle,
    TextChange,
};
use crate::export::{ClipboardPublisher, ColorMode, CopyOutcome, ExportOptions};
use crate::formatting::{apply_font_size_px, execute, force_color, FormatCommand, FormatResult};
use crate::ui::Notify;
use log::{debug, trace};

/// Initial color of the toolbar color picker.
pub const DEFAULT_PICKER_COLOR: Color = Color::rgb(0xe8, 0xee, 0xfc);

/// State of one editable panel.
#[derive(Debug, Clone)]
pub struct Panel {
    id: PanelId,
    document: RichDocument,
    options: ExportOptions,
    /// Style for text typed at `typing_anchor`
    typing_style: Option<RunStyle>,
    typing_anchor: Option<usize>,
    /// Bumped whenever the document text changes outside the editor widget
    version: u64,
    /// Selection the editor widget should restore on its next frame
    pending_selection: Option<CharRange>,
    /// Toolbar values
    pub font: String,
    pub size_px: u32,
    pub color: Color,
}

impl Panel {
    /// Create a panel holding its "Panel N" placeholder text.
    pub fn new(id: PanelId, options: ExportOptions, font: &str, size_px: u32) -> Self {
        let style = RunStyle {
            font_family: Some(font.to_string()),
            font_size: Some(FontSize::Px(size_px)),
            ..RunStyle::default()
        };
        let heading = RunStyle {
            bold: true,
            ..style.clone()
        };
        let document = RichDocument::new(vec![Block::paragraph(vec![
            Run::new(id.to_string(), heading),
            Run::new(" — type here…", style),
        ])]);

        Self {
            id,
            document,
            options,
            typing_style: None,
            typing_anchor: None,
            version: 0,
            pending_selection: None,
            font: font.to_string(),
            size_px,
            color: DEFAULT_PICKER_COLOR,
        }
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn document(&self) -> &RichDocument {
        &self.document
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn typing_style(&self) -> Option<&RunStyle> {
        self.typing_style.as_ref()
    }

    /// Take the selection the editor should restore, if any.
    pub fn take_pending_selection(&mut self) -> Option<CharRange> {
        self.pending_selection.take()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toolbar Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a formatting command to the panel's part of the page selection.
    pub fn apply_formatting(&mut self, command: &FormatCommand, selection: &mut PageSelection) {
        let result = execute(&self.document, selection.range_in(self.id), command);
        self.accept(result, selection);
    }

    /// Set the font family.
    pub fn apply_font(&mut self, name: &str, selection: &mut PageSelection) {
        self.font = name.to_string();
        self.apply_formatting(&FormatCommand::FontName(name.to_string()), selection);
    }

    /// Set a pixel font size, normalizing away legacy size markers.
    pub fn apply_size(&mut self, px: u32, selection: &mut PageSelection) {
        self.size_px = px;
        let mut result = apply_font_size_px(&self.document, selection.range_in(self.id), px);

        if let Some(color) = self.options.forced_color() {
            let forced = force_color(&mut result.document, color);
            if let Some(style) = result.typing_style.as_mut() {
                style.color = Some(color);
            }
            debug!("{}: forced {} run(s) to {}", self.id, forced, color.to_hex());
        }
        self.accept(result, selection);
    }

    /// Set the text color.
    pub fn apply_color(&mut self, color: Color, selection: &mut PageSelection) {
        self.color = color;
        self.apply_formatting(&FormatCommand::ForeColor(color), selection);
    }

    /// Change how this panel's text is colored on export.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.options.color_mode = mode;
    }

    fn accept(&mut self, result: FormatResult, selection: &mut PageSelection) {
        let text_changed = result.document.plain_text() != self.document.plain_text();
        if result.document != self.document {
            self.document = result.document;
        }
        if text_changed {
            self.version += 1;
        }

        match result.typing_style {
            Some(style) => {
                self.typing_style = Some(style);
                self.typing_anchor = Some(result.selection.start);
            }
            None if result.applied => self.clear_typing_style(),
            None => {}
        }

        selection.select(self.id, result.selection);
        self.pending_selection = Some(result.selection);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Typing
    // ─────────────────────────────────────────────────────────────────────────

    /// Bring the document in line with `text` as edited in the editor widget.
    ///
    /// Returns the caret after the edit, or `None` when nothing changed.
    pub fn apply_text_edit(&mut self, text: &str) -> Option<usize> {
        let change = TextChange::between(&self.document.plain_text(), text)?;

        let style = if change.inserted.is_empty() {
            None
        } else {
            self.typing_style
                .clone()
                .filter(|_| self.typing_anchor == Some(change.removed.start))
        };
        let caret = self
            .document
            .replace_range(change.removed, &change.inserted, style);

        trace!(
            "{}: replaced {:?} with {} char(s)",
            self.id,
            change.removed,
            change.inserted.chars().count()
        );

        if self.typing_style.is_some() {
            self.typing_anchor = Some(caret);
        }
        Some(caret)
    }

    /// Record the editor's current selection for this panel.
    ///
    /// Moving the caret away from where a typing style was set drops it.
    pub fn update_selection(&mut self, range: CharRange, selection: &mut PageSelection) {
        if let Some(anchor) = self.typing_anchor {
            if range != CharRange::caret(anchor) {
                self.clear_typing_style();
            }
        }
        selection.select(self.id, range);
    }

    fn clear_typing_style(&mut self) {
        self.typing_style = None;
        self.typing_anchor = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Copy
    // ─────────────────────────────────────────────────────────────────────────

    /// Copy the panel's content to the clipboard. The content is unchanged.
    pub fn copy_to_clipboard(
        &self,
        publisher: &mut ClipboardPublisher,
        selection: &mut PageSelection,
        notify: &mut dyn Notify,
    ) -> CopyOutcome {
        publisher.publish(self.id, &self.document, &self.options, selection, notify)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::clipboard::{ClipboardBackend, ClipboardError};
    use crate::export::email::EmailExport;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn panel(text: &str) -> Panel {
        let mut panel = Panel::new(PanelId(0), ExportOptions::default(), "Segoe UI", 14);
        panel.document = RichDocument::from_plain_text(text);
        panel
    }

    struct RichOnly(Rc<RefCell<Vec<EmailExport>>>);

    impl ClipboardBackend for RichOnly {
        fn supports_rich_write(&self) -> bool {
            true
        }

        fn write_rich(&mut self, payload: &EmailExport) -> Result<(), ClipboardError> {
            self.0.borrow_mut().push(payload.clone());
            Ok(())
        }

        fn copy_selection(&mut self, _selected: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unsupported)
        }
    }

    #[derive(Default)]
    struct Messages(Vec<String>);

    impl Notify for Messages {
        fn notify(&mut self, message: &str) {
            self.0.push(message.to_string());
        }
    }

    #[test]
    fn test_new_panel_placeholder() {
        let panel = Panel::new(PanelId(2), ExportOptions::default(), "Segoe UI", 14);
        let runs = &panel.document().blocks()[0].runs;
        assert_eq!(runs[0].text, "Panel 3");
        assert!(runs[0].style.bold);
        assert_eq!(runs[1].text, " — type here…");
        assert_eq!(runs[1].style.font_size, Some(FontSize::Px(14)));
        assert_eq!(runs[1].style.font_family.as_deref(), Some("Segoe UI"));
    }

    #[test]
    fn test_bold_then_size_then_copy() {
        let mut panel = panel("Hello world");
        let mut selection = PageSelection::new();
        selection.select(panel.id(), CharRange::new(0, 5));

        panel.apply_formatting(&FormatCommand::Bold, &mut selection);
        panel.apply_size(18, &mut selection);

        let exports = Rc::new(RefCell::new(Vec::new()));
        let mut publisher = ClipboardPublisher::new(Box::new(RichOnly(Rc::clone(&exports))));
        let mut messages = Messages::default();
        let before = panel.document().clone();
        let outcome = panel.copy_to_clipboard(&mut publisher, &mut selection, &mut messages);

        assert_eq!(outcome, CopyOutcome::Rich);
        assert_eq!(messages.0, vec!["Copied with formatting ✅"]);
        assert_eq!(panel.document(), &before);

        let exports = exports.borrow();
        assert!(exports[0]
            .html
            .contains("<span style=\"font-size:18px\"><b>Hello</b></span>"));
        assert!(!exports[0].html.contains("<font"));
        assert_eq!(exports[0].text, "Hello world");
    }

    #[test]
    fn test_selection_in_other_panel_focuses_end() {
        let mut panel = panel("Hello");
        let mut selection = PageSelection::new();
        selection.select(PanelId(3), CharRange::new(0, 2));

        panel.apply_formatting(&FormatCommand::Bold, &mut selection);

        assert_eq!(selection.range_in(panel.id()), Some(CharRange::caret(5)));
        assert_eq!(panel.take_pending_selection(), Some(CharRange::caret(5)));
        assert!(panel.typing_style().is_some_and(|style| style.bold));
        assert!(panel.document().styles_in(CharRange::new(0, 5)).iter().all(|s| !s.bold));
    }

    #[test]
    fn test_force_black_size_change() {
        let mut panel = panel("Hello");
        panel.set_color_mode(ColorMode::ForceBlack);
        let mut selection = PageSelection::new();
        panel.apply_color(Color::rgb(255, 0, 0), &mut selection);
        selection.select(panel.id(), CharRange::new(0, 5));
        panel.apply_color(Color::rgb(255, 0, 0), &mut selection);

        panel.apply_size(24, &mut selection);
        for block in panel.document().blocks() {
            for run in &block.runs {
                assert_eq!(run.style.color, Some(Color::BLACK));
                assert_eq!(run.style.font_size, Some(FontSize::Px(24)));
            }
        }
    }

    #[test]
    fn test_typing_uses_typing_style() {
        let mut panel = panel("Hello");
        let mut selection = PageSelection::new();
        selection.select(panel.id(), CharRange::caret(5));
        panel.apply_formatting(&FormatCommand::Italic, &mut selection);

        assert_eq!(panel.apply_text_edit("Hello you"), Some(9));
        let runs = &panel.document().blocks()[0].runs;
        assert_eq!(runs[1].text, " you");
        assert!(runs[1].style.italic);

        // Typing continues in the same style
        panel.update_selection(CharRange::caret(9), &mut selection);
        panel.apply_text_edit("Hello you!");
        assert_eq!(panel.document().blocks()[0].runs[1].text, " you!");

        // Moving the caret drops it
        panel.update_selection(CharRange::caret(0), &mut selection);
        assert!(panel.typing_style().is_none());
        panel.apply_text_edit(">Hello you!");
        assert!(!panel.document().blocks()[0].runs[0].style.italic);
    }

    #[test]
    fn test_text_edit_without_change() {
        let mut panel = panel("Same");
        assert_eq!(panel.apply_text_edit("Same"), None);
        assert_eq!(panel.version(), 0);
    }

    #[test]
    fn test_blank_panel_focus_resets_and_bumps_version() {
        let mut panel = panel("   ");
        let mut selection = PageSelection::new();
        panel.apply_formatting(&FormatCommand::Underline, &mut selection);

        assert_eq!(panel.document(), &RichDocument::placeholder());
        assert_eq!(panel.version(), 1);
        assert_eq!(selection.range_in(panel.id()), Some(CharRange::caret(0)));
    }
}
