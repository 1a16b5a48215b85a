//! Formatting Commands
//!
//! Toolbar actions become [`FormatCommand`]s, which [`execute`] applies to a
//! document and an explicit selection. Execution is a pure function of
//! `(document, selection, command)`: it never touches UI state and never
//! fails loudly. A command that cannot apply leaves the content as it was.
//!
//! # Usage
//! ```ignore
//! use crate::content::{CharRange, RichDocument};
//! use crate::formatting::{execute, FormatCommand};
//!
//! let doc = RichDocument::from_plain_text("Hello world");
//! let result = execute(&doc, Some(CharRange::new(0, 5)), &FormatCommand::Bold);
//! assert!(result.applied);
//! ```

use crate::content::{Alignment, BlockKind, CharRange, Color, FontSize, RichDocument, RunStyle};
use log::{debug, warn};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Format Command Enum
// ─────────────────────────────────────────────────────────────────────────────

/// Formatting operations available from a panel toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    /// Toggle bold
    Bold,
    /// Toggle italic
    Italic,
    /// Toggle underline
    Underline,
    /// Set the font family
    FontName(String),
    /// Set a legacy 1-7 size bucket (see [`crate::formatting::apply_font_size_px`])
    FontSize(u8),
    /// Set the text color
    ForeColor(Color),
    /// Set block alignment
    Justify(Alignment),
    /// Toggle bullet list
    InsertUnorderedList,
    /// Clear inline formatting
    RemoveFormat,
}

impl FormatCommand {
    /// Name of the equivalent legacy rich-text editing command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::FontName(_) => "fontName",
            Self::FontSize(_) => "fontSize",
            Self::ForeColor(_) => "foreColor",
            Self::Justify(Alignment::Left) => "justifyLeft",
            Self::Justify(Alignment::Center) => "justifyCenter",
            Self::Justify(Alignment::Right) => "justifyRight",
            Self::Justify(Alignment::Justify) => "justifyFull",
            Self::InsertUnorderedList => "insertUnorderedList",
            Self::RemoveFormat => "removeFormat",
        }
    }

    /// Parse a command from its legacy name and optional value.
    #[allow(dead_code)]
    pub fn parse(name: &str, value: Option<&str>) -> Result<Self, FormatError> {
        let required = || {
            value.ok_or_else(|| FormatError::MissingValue {
                command: name.to_string(),
            })
        };
        let invalid = |value: &str| FormatError::InvalidValue {
            command: name.to_string(),
            value: value.to_string(),
        };

        let command = match name {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "fontName" => Self::FontName(required()?.to_string()),
            "fontSize" => {
                let value = required()?;
                Self::FontSize(value.trim().parse().map_err(|_| invalid(value))?)
            }
            "foreColor" => {
                let value = required()?;
                Self::ForeColor(Color::from_hex(value).ok_or_else(|| invalid(value))?)
            }
            "justifyLeft" => Self::Justify(Alignment::Left),
            "justifyCenter" => Self::Justify(Alignment::Center),
            "justifyRight" => Self::Justify(Alignment::Right),
            "justifyFull" => Self::Justify(Alignment::Justify),
            "insertUnorderedList" => Self::InsertUnorderedList,
            "removeFormat" => Self::RemoveFormat,
            _ => return Err(FormatError::UnknownCommand(name.to_string())),
        };
        command.validate()?;
        Ok(command)
    }

    /// Get the keyboard shortcut label for this command, if it has one.
    pub fn shortcut_label(&self) -> Option<&'static str> {
        match self {
            Self::Bold => Some("Ctrl+B"),
            Self::Italic => Some("Ctrl+I"),
            Self::Underline => Some("Ctrl+U"),
            Self::InsertUnorderedList => Some("Ctrl+Shift+8"),
            Self::RemoveFormat => Some("Ctrl+\\"),
            _ => None,
        }
    }

    /// Get the icon for this command (for toolbar).
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Bold => "B",
            Self::Italic => "I",
            Self::Underline => "U",
            Self::FontName(_) => "F",
            Self::FontSize(_) => "A",
            Self::ForeColor(_) => "🎨",
            Self::Justify(Alignment::Left) => "⬅",
            Self::Justify(Alignment::Center) => "↔",
            Self::Justify(Alignment::Right) => "➡",
            Self::Justify(Alignment::Justify) => "☰",
            Self::InsertUnorderedList => "• List",
            Self::RemoveFormat => "Clear",
        }
    }

    /// Get the tooltip text for this command.
    pub fn tooltip(&self) -> String {
        let name = match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Underline => "Underline",
            Self::FontName(_) => "Font",
            Self::FontSize(_) => "Font size",
            Self::ForeColor(_) => "Text color",
            Self::Justify(align) => align.label(),
            Self::InsertUnorderedList => "Bullets",
            Self::RemoveFormat => "Clear formatting",
        };
        match self.shortcut_label() {
            Some(shortcut) => format!("{} ({})", name, shortcut),
            None => name.to_string(),
        }
    }

    /// Whether the command changes blocks rather than runs.
    fn is_block_command(&self) -> bool {
        matches!(self, Self::Justify(_) | Self::InsertUnorderedList)
    }

    fn validate(&self) -> Result<(), FormatError> {
        match self {
            Self::FontName(name) if name.trim().is_empty() => Err(FormatError::InvalidValue {
                command: self.name().to_string(),
                value: name.clone(),
            }),
            Self::FontSize(bucket) if !(1..=7).contains(bucket) => {
                Err(FormatError::InvalidValue {
                    command: self.name().to_string(),
                    value: bucket.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Current state of a toggle command in `style`; `None` for non-toggles.
    fn toggle_state(&self, style: &RunStyle) -> Option<bool> {
        match self {
            Self::Bold => Some(style.bold),
            Self::Italic => Some(style.italic),
            Self::Underline => Some(style.underline),
            _ => None,
        }
    }

    /// Apply an inline command to one style. `enable` is the toggle target.
    fn apply_to_style(&self, style: &mut RunStyle, enable: bool) {
        match self {
            Self::Bold => style.bold = enable,
            Self::Italic => style.italic = enable,
            Self::Underline => style.underline = enable,
            Self::FontName(name) => style.font_family = Some(name.trim().to_string()),
            Self::FontSize(bucket) => style.font_size = Some(FontSize::Legacy(*bucket)),
            Self::ForeColor(color) => style.color = Some(*color),
            Self::RemoveFormat => *style = RunStyle::default(),
            Self::Justify(_) | Self::InsertUnorderedList => {}
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Error
// ─────────────────────────────────────────────────────────────────────────────

/// Reasons a formatting command has no effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// No command has this name
    UnknownCommand(String),
    /// The command needs a value and got none
    MissingValue { command: String },
    /// The command carries a value it cannot use
    InvalidValue { command: String, value: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownCommand(name) => write!(f, "unknown command '{}'", name),
            FormatError::MissingValue { command } => write!(f, "{} needs a value", command),
            FormatError::InvalidValue { command, value } => {
                write!(f, "invalid value '{}' for {}", value, command)
            }
        }
    }
}

impl std::error::Error for FormatError {}

// ─────────────────────────────────────────────────────────────────────────────
// Format Result
// ─────────────────────────────────────────────────────────────────────────────

/// Result of applying a formatting command.
#[derive(Debug, Clone)]
pub struct FormatResult {
    /// The document after formatting
    pub document: RichDocument,
    /// Selection to restore in the region
    pub selection: CharRange,
    /// Whether the document content was changed by the command
    pub applied: bool,
    /// Style for the next typed text, set when an inline command hit a caret
    pub typing_style: Option<RunStyle>,
}

impl FormatResult {
    fn applied(document: RichDocument, selection: CharRange) -> Self {
        Self {
            document,
            selection,
            applied: true,
            typing_style: None,
        }
    }

    fn unchanged(document: RichDocument, selection: CharRange) -> Self {
        Self {
            document,
            selection,
            applied: false,
            typing_style: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Execution
// ─────────────────────────────────────────────────────────────────────────────

/// Give a region a valid insertion point.
///
/// A selection that is absent (held by another region, or none at all) or
/// out of bounds is replaced by a caret at the end of the content. A blank
/// region is first reset to a single empty placeholder block.
pub fn focus_region(
    document: &RichDocument,
    selection: Option<CharRange>,
) -> (RichDocument, CharRange) {
    let len = document.len_chars();
    match selection {
        Some(range) if range.fits(len) => {
            let mut document = document.clone();
            document.normalize();
            (document, range)
        }
        _ if document.is_blank() => {
            debug!("Focusing blank region, inserting placeholder block");
            (RichDocument::placeholder(), CharRange::caret(0))
        }
        _ => {
            let mut document = document.clone();
            document.normalize();
            (document, CharRange::caret(len))
        }
    }
}

/// Apply `command` to `selection` in `document`.
///
/// Never fails: a command that cannot apply is logged and the focused
/// document is returned with `applied == false`.
pub fn execute(
    document: &RichDocument,
    selection: Option<CharRange>,
    command: &FormatCommand,
) -> FormatResult {
    let (document, selection) = focus_region(document, selection);

    if let Err(e) = command.validate() {
        warn!("Formatting command {} had no effect: {}", command.name(), e);
        return FormatResult::unchanged(document, selection);
    }

    if command.is_block_command() {
        return apply_block_command(document, selection, command);
    }

    if selection.is_collapsed() {
        let mut style = document.style_at(selection.start);
        let enable = command.toggle_state(&style).map_or(true, |on| !on);
        command.apply_to_style(&mut style, enable);
        debug!(
            "{} at caret {}: updating typing style",
            command.name(),
            selection.start
        );
        let mut result = FormatResult::unchanged(document, selection);
        result.typing_style = Some(style);
        return result;
    }

    // Toggles switch off only when every selected character already has the mark
    let enable = match command.toggle_state(&RunStyle::default()) {
        Some(_) => !document
            .styles_in(selection)
            .iter()
            .all(|style| command.toggle_state(style) == Some(true)),
        None => true,
    };

    let mut document = document;
    document.map_styles(selection, |style| command.apply_to_style(style, enable));
    debug!(
        "Applied {} to {}..{}",
        command.name(),
        selection.start,
        selection.end
    );
    FormatResult::applied(document, selection)
}

fn apply_block_command(
    mut document: RichDocument,
    selection: CharRange,
    command: &FormatCommand,
) -> FormatResult {
    match command {
        FormatCommand::Justify(align) => {
            document.map_blocks(selection, |block| block.align = *align);
        }
        FormatCommand::InsertUnorderedList => {
            let all_bullets = document.blocks()[document.block_indices(selection)]
                .iter()
                .all(|block| block.kind == BlockKind::BulletItem);
            let kind = if all_bullets {
                BlockKind::Paragraph
            } else {
                BlockKind::BulletItem
            };
            document.map_blocks(selection, |block| block.kind = kind);
        }
        _ => return FormatResult::unchanged(document, selection),
    }
    debug!("Applied {} to blocks at {:?}", command.name(), selection);
    FormatResult::applied(document, selection)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
