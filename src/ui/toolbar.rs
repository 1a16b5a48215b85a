//! Panel Toolbar
//!
//! The formatting controls above each editor: font and size menus, the color
//! picker, inline toggles, bullets, alignment and clear formatting.

use crate::config::FontOption;
use crate::content::{Alignment, BlockKind, CharRange, Color, RichDocument, RunStyle};
use crate::formatting::FormatCommand;
use eframe::egui::{self, Color32, Response, RichText, Ui, Vec2};

/// Size of toolbar buttons.
const BUTTON_SIZE: Vec2 = Vec2::new(26.0, 24.0);

/// Actions that can be triggered from a toolbar.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    /// Apply a formatting command
    Format(FormatCommand),
    /// Pick a font family
    Font(String),
    /// Pick a pixel size
    Size(u32),
    /// Pick a text color
    Color(Color),
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting State
// ─────────────────────────────────────────────────────────────────────────────

/// Formatting at the selection, for button highlighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormattingState {
    pub is_bold: bool,
    pub is_italic: bool,
    pub is_underline: bool,
    pub is_bullet_list: bool,
    pub alignment: Alignment,
}

impl FormattingState {
    /// Detect the formatting of `range`. A caret reports the pending typing
    /// style when there is one, otherwise the style it would type with.
    pub fn detect(
        document: &RichDocument,
        range: Option<CharRange>,
        typing_style: Option<&RunStyle>,
    ) -> Self {
        let Some(range) = range.filter(|range| range.fits(document.len_chars())) else {
            return Self::default();
        };

        let (is_bold, is_italic, is_underline) = if range.is_collapsed() {
            let style = typing_style
                .cloned()
                .unwrap_or_else(|| document.style_at(range.start));
            (style.bold, style.italic, style.underline)
        } else {
            let styles = document.styles_in(range);
            let all = |mark: fn(&RunStyle) -> bool| {
                !styles.is_empty() && styles.iter().all(|style| mark(style))
            };
            (
                all(|s: &RunStyle| s.bold),
                all(|s: &RunStyle| s.italic),
                all(|s: &RunStyle| s.underline),
            )
        };

        let blocks = &document.blocks()[document.block_indices(range)];
        Self {
            is_bold,
            is_italic,
            is_underline,
            is_bullet_list: blocks.iter().all(|b| b.kind == BlockKind::BulletItem),
            alignment: blocks.first().map(|b| b.align).unwrap_or_default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Toolbar
// ─────────────────────────────────────────────────────────────────────────────

/// The toolbar of one panel.
pub struct Toolbar<'a> {
    /// Distinguishes the combo boxes of different panels
    id_source: egui::Id,
    fonts: &'a [FontOption],
    sizes: &'a [u32],
    show_color_picker: bool,
}

impl<'a> Toolbar<'a> {
    pub fn new(id_source: egui::Id, fonts: &'a [FontOption], sizes: &'a [u32]) -> Self {
        Self {
            id_source,
            fonts,
            sizes,
            show_color_picker: true,
        }
    }

    /// Set whether the color picker is shown.
    #[must_use]
    pub fn color_picker(mut self, show: bool) -> Self {
        self.show_color_picker = show;
        self
    }

    /// Render the toolbar and return any triggered action.
    pub fn show(
        &self,
        ui: &mut Ui,
        font: &str,
        size_px: u32,
        color: Color,
        state: FormattingState,
    ) -> Option<ToolbarAction> {
        let mut action = None;
        let is_dark = ui.visuals().dark_mode;

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 3.0;

            // Font menu
            let font_label = self
                .fonts
                .iter()
                .find(|option| option.value == font)
                .map_or(font, |option| option.label.as_str());
            egui::ComboBox::from_id_source(self.id_source.with("font"))
                .selected_text(RichText::new(font_label).size(12.0))
                .width(140.0)
                .show_ui(ui, |ui| {
                    for option in self.fonts {
                        if ui
                            .selectable_label(option.value == font, option.label.as_str())
                            .clicked()
                        {
                            action = Some(ToolbarAction::Font(option.value.clone()));
                        }
                    }
                });

            // Size menu
            egui::ComboBox::from_id_source(self.id_source.with("size"))
                .selected_text(RichText::new(format!("{} px", size_px)).size(12.0))
                .width(60.0)
                .show_ui(ui, |ui| {
                    for &px in self.sizes {
                        if ui
                            .selectable_label(px == size_px, format!("{} px", px))
                            .clicked()
                        {
                            action = Some(ToolbarAction::Size(px));
                        }
                    }
                });

            if self.show_color_picker {
                let mut rgb = [color.r, color.g, color.b];
                if ui
                    .color_edit_button_srgb(&mut rgb)
                    .on_hover_text("Text color")
                    .changed()
                {
                    action = Some(ToolbarAction::Color(Color::rgb(rgb[0], rgb[1], rgb[2])));
                }
            }

            ui.separator();

            let toggles = [
                (FormatCommand::Bold, state.is_bold),
                (FormatCommand::Italic, state.is_italic),
                (FormatCommand::Underline, state.is_underline),
            ];
            for (command, active) in toggles {
                if format_button(ui, &command, active, is_dark).clicked() {
                    action = Some(ToolbarAction::Format(command));
                }
            }

            let bullets = FormatCommand::InsertUnorderedList;
            if format_button(ui, &bullets, state.is_bullet_list, is_dark).clicked() {
                action = Some(ToolbarAction::Format(bullets));
            }

            ui.separator();

            for &align in Alignment::all() {
                let command = FormatCommand::Justify(align);
                if format_button(ui, &command, state.alignment == align, is_dark).clicked() {
                    action = Some(ToolbarAction::Format(command));
                }
            }

            ui.separator();

            let clear = FormatCommand::RemoveFormat;
            if format_button(ui, &clear, false, is_dark).clicked() {
                action = Some(ToolbarAction::Format(clear));
            }
        });

        action
    }
}

/// Render a format button with active state highlighting.
fn format_button(ui: &mut Ui, command: &FormatCommand, active: bool, is_dark: bool) -> Response {
    let text_color = if is_dark {
        Color32::from_rgb(220, 220, 220)
    } else {
        Color32::from_rgb(50, 50, 50)
    };
    let active_bg = if is_dark {
        Color32::from_rgb(70, 90, 120)
    } else {
        Color32::from_rgb(200, 220, 240)
    };

    let mut text = RichText::new(command.icon()).size(13.0).color(text_color);
    match command {
        FormatCommand::Bold => text = text.strong(),
        FormatCommand::Italic => text = text.italics(),
        FormatCommand::Underline => text = text.underline(),
        _ => {}
    }

    let btn = ui.add(
        egui::Button::new(text)
            .fill(if active { active_bg } else { Color32::TRANSPARENT })
            .min_size(BUTTON_SIZE),
    );
    btn.on_hover_text(command.tooltip())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::execute;

    #[test]
    fn test_state_without_selection_is_default() {
        let doc = RichDocument::from_plain_text("Hello");
        assert_eq!(FormattingState::detect(&doc, None, None), FormattingState::default());
    }

    #[test]
    fn test_state_of_bold_range() {
        let doc = RichDocument::from_plain_text("Hello world");
        let doc = execute(&doc, Some(CharRange::new(0, 5)), &FormatCommand::Bold).document;

        let state = FormattingState::detect(&doc, Some(CharRange::new(0, 5)), None);
        assert!(state.is_bold);
        let state = FormattingState::detect(&doc, Some(CharRange::new(0, 8)), None);
        assert!(!state.is_bold);
    }

    #[test]
    fn test_state_at_caret_prefers_typing_style() {
        let doc = RichDocument::from_plain_text("Hello");
        let typing = RunStyle {
            italic: true,
            ..RunStyle::default()
        };
        let state = FormattingState::detect(&doc, Some(CharRange::caret(5)), Some(&typing));
        assert!(state.is_italic);
        assert!(!state.is_bold);
    }

    #[test]
    fn test_state_blocks() {
        let doc = RichDocument::from_plain_text("one\ntwo");
        let doc = execute(&doc, Some(CharRange::caret(5)), &FormatCommand::InsertUnorderedList).document;
        let doc = execute(&doc, Some(CharRange::caret(5)), &FormatCommand::Justify(Alignment::Right)).document;

        let state = FormattingState::detect(&doc, Some(CharRange::caret(5)), None);
        assert!(state.is_bullet_list);
        assert_eq!(state.alignment, Alignment::Right);

        let state = FormattingState::detect(&doc, Some(CharRange::new(0, 7)), None);
        assert!(!state.is_bullet_list);
        assert_eq!(state.alignment, Alignment::Left);
    }

    #[test]
    fn test_state_ignores_block_after_boundary() {
        let doc = RichDocument::from_plain_text("one\ntwo");
        let doc = execute(&doc, Some(CharRange::caret(1)), &FormatCommand::InsertUnorderedList).document;

        let state = FormattingState::detect(&doc, Some(CharRange::new(0, 4)), None);
        assert!(state.is_bullet_list);
    }

    #[test]
    fn test_toolbar_action_equality() {
        assert_eq!(ToolbarAction::Size(14), ToolbarAction::Size(14));
        assert_ne!(
            ToolbarAction::Format(FormatCommand::Bold),
            ToolbarAction::Format(FormatCommand::Italic)
        );
    }
}
