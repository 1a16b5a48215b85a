//! Rich text editor widget for RichCopy
//!
//! This module implements a panel's editor using egui's TextEdit. The
//! TextEdit edits the document's plain text; a layouter paints the
//! document's run styles over it, and edits are folded back into the
//! document as text changes.

use super::panel::Panel;
use crate::content::{BlockKind, CharRange, FontSize, PageSelection, RichDocument, RunStyle};
use crate::formatting::{legacy_bucket_px, FormatCommand};
use eframe::egui::{self, FontFamily, FontId, Key, KeyboardShortcut, Modifiers, TextEdit, Ui};
use log::debug;
use std::sync::Arc;

/// Indent of bullet items, in points.
const BULLET_INDENT: f32 = 18.0;

/// Result of showing the editor widget.
pub struct EditorOutput {
    /// Formatting shortcut pressed while the editor had focus.
    pub shortcut: Option<FormatCommand>,
}

/// A rich text editor bound to a [`Panel`].
///
/// # Example
///
/// ```ignore
/// EditorWidget::new(&mut panel, &mut page_selection)
///     .font_size(14.0)
///     .desired_rows(8)
///     .show(ui);
/// ```
pub struct EditorWidget<'a> {
    /// The panel being edited.
    panel: &'a mut Panel,
    /// The page-wide selection.
    selection: &'a mut PageSelection,
    /// Font size for text without an explicit size.
    font_size: f32,
    /// Minimum height in rows.
    desired_rows: usize,
    /// ID for the editor (for state persistence).
    id: Option<egui::Id>,
}

impl<'a> EditorWidget<'a> {
    /// Create a new editor widget for the given panel.
    pub fn new(panel: &'a mut Panel, selection: &'a mut PageSelection) -> Self {
        Self {
            panel,
            selection,
            font_size: 14.0,
            desired_rows: 8,
            id: None,
        }
    }

    /// Set the font size for unsized text.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the minimum editor height in rows.
    #[must_use]
    pub fn desired_rows(mut self, rows: usize) -> Self {
        self.desired_rows = rows;
        self
    }

    /// Set a custom ID for the editor.
    #[must_use]
    pub fn id(mut self, id: egui::Id) -> Self {
        self.id = Some(id);
        self
    }

    /// Show the editor widget and return the output.
    pub fn show(self, ui: &mut Ui) -> EditorOutput {
        // Include the panel version in the ID so that egui treats the TextEdit
        // as a new widget when the text changes outside of it.
        let base_id = self
            .id
            .unwrap_or_else(|| ui.id().with(("editor", self.panel.id().0)));
        let id = base_id.with(self.panel.version());

        let restore = self.panel.take_pending_selection();
        if let Some(range) = restore {
            let mut state = TextEdit::load_state(ui.ctx(), id).unwrap_or_default();
            state
                .cursor
                .set_char_range(Some(egui::text::CCursorRange::two(
                    egui::text::CCursor::new(range.start),
                    egui::text::CCursor::new(range.end),
                )));
            TextEdit::store_state(ui.ctx(), id, state);
        }

        let snapshot = self.panel.document().clone();
        let mut text = snapshot.plain_text();
        let font_size = self.font_size;

        let layout_doc = snapshot.clone();
        let mut layouter = move |ui: &Ui, text: &str, wrap_width: f32| -> Arc<egui::Galley> {
            let mut job = layout_document(&layout_doc, text, font_size, ui.visuals());
            job.wrap.max_width = wrap_width;
            ui.fonts(|f| f.layout_job(job))
        };

        let text_output = TextEdit::multiline(&mut text)
            .id(id)
            .font(FontId::proportional(font_size))
            .desired_width(f32::INFINITY)
            .desired_rows(self.desired_rows)
            .lock_focus(true)
            .layouter(&mut layouter)
            .show(ui);

        if restore.is_some() {
            text_output.response.request_focus();
        }

        paint_bullets(ui, &snapshot, &text, &text_output);

        let has_focus = text_output.response.has_focus();
        let shortcut = if has_focus { consume_shortcut(ui) } else { None };

        // Fold the edit back into the document
        if self.panel.apply_text_edit(&text).is_some() {
            debug!("{} content changed", self.panel.id());
        }

        if has_focus {
            if let Some(cursor_range) = text_output.cursor_range {
                let range = CharRange::new(
                    cursor_range.primary.ccursor.index,
                    cursor_range.secondary.ccursor.index,
                );
                self.panel.update_selection(range, self.selection);
            }
        }

        EditorOutput { shortcut }
    }
}

/// Build the layout for `text`, styled from `document` when it matches.
///
/// The text and document disagree for the one frame in which an edit has
/// not been folded back yet; that frame is laid out unstyled.
fn layout_document(
    document: &RichDocument,
    text: &str,
    base_size: f32,
    visuals: &egui::Visuals,
) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob::default();

    if document.plain_text() != text {
        job.append(
            text,
            0.0,
            run_format(&RunStyle::default(), base_size, visuals),
        );
        return job;
    }

    for (index, block) in document.blocks().iter().enumerate() {
        let indent = if block.kind == BlockKind::BulletItem {
            BULLET_INDENT
        } else {
            0.0
        };
        let mut last_format = run_format(&RunStyle::default(), base_size, visuals);
        let mut leading = indent;

        if index > 0 {
            job.append("\n", 0.0, last_format.clone());
        }
        for run in &block.runs {
            last_format = run_format(&run.style, base_size, visuals);
            job.append(&run.text, leading, last_format.clone());
            leading = 0.0;
        }
        if block.runs.is_empty() && indent > 0.0 {
            job.append("", indent, last_format);
        }
    }
    job
}

/// egui text format of a run.
fn run_format(style: &RunStyle, base_size: f32, visuals: &egui::Visuals) -> egui::TextFormat {
    let size = match style.font_size {
        Some(FontSize::Px(px)) => px as f32,
        Some(FontSize::Legacy(bucket)) => legacy_bucket_px(bucket) as f32,
        None => base_size,
    };
    let family = match style.font_family.as_deref() {
        Some(name) if name.eq_ignore_ascii_case("Courier New") => FontFamily::Monospace,
        _ => FontFamily::Proportional,
    };

    // Default fonts have no bold face; bold uses the strong text color
    let color = match style.color {
        Some(c) => egui::Color32::from_rgb(c.r, c.g, c.b),
        None if style.bold => visuals.strong_text_color(),
        None => visuals.text_color(),
    };

    egui::TextFormat {
        font_id: FontId::new(size, family),
        color,
        italics: style.italic,
        underline: if style.underline {
            egui::Stroke::new(1.0, color)
        } else {
            egui::Stroke::NONE
        },
        ..Default::default()
    }
}

/// Draw a bullet in front of every bullet item.
fn paint_bullets(
    ui: &Ui,
    document: &RichDocument,
    text: &str,
    output: &egui::widgets::text_edit::TextEditOutput,
) {
    if document.plain_text() != text {
        return;
    }
    let galley = &output.galley;
    let galley_pos = output.galley_pos;
    let color = ui.visuals().text_color();

    let mut start = 0;
    for block in document.blocks() {
        if block.kind == BlockKind::BulletItem {
            let cursor = galley.from_ccursor(egui::text::CCursor::new(start));
            if let Some(row) = galley.rows.get(cursor.rcursor.row) {
                let center = egui::pos2(
                    galley_pos.x + BULLET_INDENT / 2.0,
                    galley_pos.y + row.rect.center().y,
                );
                ui.painter().circle_filled(center, 2.5, color);
            }
        }
        start += block.len_chars() + 1;
    }
}

/// Formatting shortcuts handled by the editor.
fn consume_shortcut(ui: &mut Ui) -> Option<FormatCommand> {
    let shortcuts = [
        (KeyboardShortcut::new(Modifiers::COMMAND, Key::B), FormatCommand::Bold),
        (KeyboardShortcut::new(Modifiers::COMMAND, Key::I), FormatCommand::Italic),
        (KeyboardShortcut::new(Modifiers::COMMAND, Key::U), FormatCommand::Underline),
        (
            KeyboardShortcut::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::Num8),
            FormatCommand::InsertUnorderedList,
        ),
        (
            KeyboardShortcut::new(Modifiers::COMMAND, Key::Backslash),
            FormatCommand::RemoveFormat,
        ),
    ];
    ui.input_mut(|i| {
        shortcuts
            .into_iter()
            .find(|(shortcut, _)| i.consume_shortcut(shortcut))
            .map(|(_, command)| command)
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Block, Color, Run};

    fn sample() -> RichDocument {
        let red_bold = RunStyle {
            bold: true,
            color: Some(Color::rgb(200, 0, 0)),
            font_size: Some(FontSize::Px(20)),
            ..RunStyle::default()
        };
        let mut bullet = Block::paragraph(vec![Run::plain("item")]);
        bullet.kind = BlockKind::BulletItem;
        RichDocument::new(vec![
            Block::paragraph(vec![Run::new("Hi", red_bold), Run::plain(" there")]),
            bullet,
        ])
    }

    #[test]
    fn test_layout_follows_runs() {
        let doc = sample();
        let job = layout_document(&doc, &doc.plain_text(), 14.0, &egui::Visuals::light());

        assert_eq!(job.text, "Hi there\nitem");
        assert_eq!(job.sections.len(), 4);
        assert_eq!(job.sections[0].format.font_id.size, 20.0);
        assert_eq!(
            job.sections[0].format.color,
            egui::Color32::from_rgb(200, 0, 0)
        );
        assert_eq!(job.sections[3].leading_space, BULLET_INDENT);
    }

    #[test]
    fn test_layout_falls_back_when_text_differs() {
        let job = layout_document(&sample(), "typed", 14.0, &egui::Visuals::dark());
        assert_eq!(job.text, "typed");
        assert_eq!(job.sections.len(), 1);
    }

    #[test]
    fn test_run_format_legacy_size_and_monospace() {
        let style = RunStyle {
            font_family: Some("Courier New".to_string()),
            font_size: Some(FontSize::Legacy(4)),
            underline: true,
            ..RunStyle::default()
        };
        let format = run_format(&style, 14.0, &egui::Visuals::light());
        assert_eq!(format.font_id, FontId::new(18.0, FontFamily::Monospace));
        assert!(format.underline.width > 0.0);
    }
}
