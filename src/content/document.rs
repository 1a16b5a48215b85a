//! Rich Text Document Model
//!
//! A panel's content is a list of blocks, each holding styled runs of text.
//! The document's text is the blocks' texts joined by a single `\n`, and every
//! position used by the editing and formatting code is a character offset into
//! that text.
//!
//! Runs inside a block are kept normalized: no empty runs and no two adjacent
//! runs with the same style.

use super::selection::CharRange;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// An opaque RGB text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form used in exported markup.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` or `#rgb`.
    #[allow(dead_code)]
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            6 if hex.is_ascii() => Some(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 if hex.is_ascii() => {
                let mut parts = hex.chars().map(|c| channel(&format!("{c}{c}")));
                Some(Self::rgb(parts.next()??, parts.next()??, parts.next()??))
            }
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Run Style
// ─────────────────────────────────────────────────────────────────────────────

/// Font size of a run.
///
/// `Legacy` is the 1-7 magnitude produced by the size command before
/// normalization; exported markup should only ever carry `Px`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Legacy(u8),
    Px(u32),
}

/// Inline formatting of a run of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default)]
    pub style: RunStyle,
}

impl Run {
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, RunStyle::default())
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Blocks
// ─────────────────────────────────────────────────────────────────────────────

/// Kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    #[default]
    Paragraph,
    BulletItem,
}

/// Horizontal alignment of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// CSS `text-align` value, `None` for the default left alignment.
    pub fn css_value(&self) -> Option<&'static str> {
        match self {
            Alignment::Left => None,
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
            Alignment::Justify => Some("justify"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Alignment::Left => "Align left",
            Alignment::Center => "Align center",
            Alignment::Right => "Align right",
            Alignment::Justify => "Justify",
        }
    }

    pub fn all() -> &'static [Alignment] {
        &[
            Alignment::Left,
            Alignment::Center,
            Alignment::Right,
            Alignment::Justify,
        ]
    }
}

/// A paragraph or list item holding styled runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub kind: BlockKind,
    #[serde(default)]
    pub align: Alignment,
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Block {
    pub fn paragraph(runs: Vec<Run>) -> Self {
        let mut block = Self {
            kind: BlockKind::Paragraph,
            align: Alignment::Left,
            runs,
        };
        block.normalize();
        block
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn len_chars(&self) -> usize {
        self.runs.iter().map(Run::len_chars).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }

    /// Drop empty runs and merge neighbours with identical style.
    pub fn normalize(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.text.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.style == run.style => last.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }

    /// Style a character typed at `offset` would inherit.
    fn style_at(&self, offset: usize) -> Option<RunStyle> {
        let mut seen = 0;
        let mut first = None;
        for run in self.runs.iter().filter(|run| !run.text.is_empty()) {
            first.get_or_insert(run);
            let len = run.len_chars();
            if offset > seen && offset <= seen + len {
                return Some(run.style.clone());
            }
            seen += len;
        }
        if offset == 0 {
            first.map(|run| run.style.clone())
        } else {
            self.runs
                .iter()
                .rev()
                .find(|run| !run.text.is_empty())
                .map(|run| run.style.clone())
        }
    }

    /// Ensure a run boundary at `offset`, returning the index of the run that
    /// starts there (or `runs.len()` at the end of the block).
    fn split_at_boundary(&mut self, offset: usize) -> usize {
        let mut seen = 0;
        for i in 0..self.runs.len() {
            if offset == seen {
                return i;
            }
            let len = self.runs[i].len_chars();
            if offset < seen + len {
                let at = byte_index(&self.runs[i].text, offset - seen);
                let tail = self.runs[i].text.split_off(at);
                let style = self.runs[i].style.clone();
                self.runs.insert(i + 1, Run::new(tail, style));
                return i + 1;
            }
            seen += len;
        }
        self.runs.len()
    }

    /// Split the block at `offset`, returning the runs after it.
    fn split_off(&mut self, offset: usize) -> Vec<Run> {
        let index = self.split_at_boundary(offset);
        let tail = self.runs.split_off(index);
        self.normalize();
        tail
    }

    fn insert_text(&mut self, offset: usize, text: &str, style: RunStyle) {
        if text.is_empty() {
            return;
        }
        let index = self.split_at_boundary(offset);
        self.runs.insert(index, Run::new(text, style));
        self.normalize();
    }

    fn remove(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let first = self.split_at_boundary(start);
        let last = self.split_at_boundary(end);
        self.runs.drain(first..last);
        self.normalize();
    }

    fn map_styles(&mut self, start: usize, end: usize, f: &mut impl FnMut(&mut RunStyle)) {
        if start >= end {
            return;
        }
        let first = self.split_at_boundary(start);
        let last = self.split_at_boundary(end);
        for run in &mut self.runs[first..last] {
            f(&mut run.style);
        }
        self.normalize();
    }

    fn styles(&self, start: usize, end: usize) -> Vec<&RunStyle> {
        let mut styles = Vec::new();
        let mut seen = 0;
        for run in &self.runs {
            let len = run.len_chars();
            if len > 0 && seen < end && seen + len > start {
                styles.push(&run.style);
            }
            seen += len;
        }
        styles
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// The content of one editable region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichDocument {
    #[serde(default)]
    blocks: Vec<Block>,
}

impl Default for RichDocument {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl RichDocument {
    /// Build a document from blocks. An empty list becomes the placeholder.
    pub fn new(blocks: Vec<Block>) -> Self {
        let mut document = Self { blocks };
        document.normalize();
        document
    }

    /// A single empty paragraph, the minimal valid content.
    pub fn placeholder() -> Self {
        Self {
            blocks: vec![Block::empty()],
        }
    }

    /// One unstyled paragraph per line of `text`.
    pub fn from_plain_text(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(|line| Block::paragraph(vec![Run::plain(line)]))
                .collect(),
        )
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Text of the whole document, blocks separated by `\n`.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len_chars(&self) -> usize {
        let text: usize = self.blocks.iter().map(Block::len_chars).sum();
        text + self.blocks.len().saturating_sub(1)
    }

    /// Whether the region is visually empty: only paragraphs, holding nothing
    /// but whitespace.
    pub fn is_blank(&self) -> bool {
        self.blocks
            .iter()
            .all(|block| block.kind == BlockKind::Paragraph && block.text().trim().is_empty())
    }

    /// Restore the invariants: at least one block, normalized runs.
    pub fn normalize(&mut self) {
        if self.blocks.is_empty() {
            self.blocks.push(Block::empty());
        }
        for block in &mut self.blocks {
            block.normalize();
        }
    }

    /// Map a document offset to `(block index, offset within block)`.
    fn locate(&self, pos: usize) -> (usize, usize) {
        let mut seen = 0;
        for (index, block) in self.blocks.iter().enumerate() {
            let len = block.len_chars();
            if pos <= seen + len {
                return (index, pos - seen);
            }
            seen += len + 1;
        }
        let last = self.blocks.len().saturating_sub(1);
        (last, self.blocks.get(last).map_or(0, Block::len_chars))
    }

    /// Document offset at which each block starts, paired with its length.
    fn block_spans(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.blocks.iter().scan(0usize, |seen, block| {
            let start = *seen;
            let len = block.len_chars();
            *seen += len + 1;
            Some((start, len))
        })
    }

    /// Style a character typed at `pos` inherits.
    pub fn style_at(&self, pos: usize) -> RunStyle {
        let (index, offset) = self.locate(pos);
        let Some(current) = self.blocks.get(index) else {
            return RunStyle::default();
        };
        current
            .style_at(offset)
            .or_else(|| {
                self.blocks[..index]
                    .iter()
                    .rev()
                    .find_map(|block| block.style_at(block.len_chars()))
            })
            .unwrap_or_default()
    }

    /// Styles of every run overlapping `range`.
    pub fn styles_in(&self, range: CharRange) -> Vec<&RunStyle> {
        let mut styles = Vec::new();
        for (block, (start, len)) in self.blocks.iter().zip(self.block_spans()) {
            let local_start = range.start.max(start).saturating_sub(start);
            let local_end = range.end.min(start + len).saturating_sub(start);
            if local_start < local_end {
                styles.extend(block.styles(local_start, local_end));
            }
        }
        styles
    }

    /// Apply `f` to the style of every character in `range`.
    pub fn map_styles(&mut self, range: CharRange, mut f: impl FnMut(&mut RunStyle)) {
        let spans: Vec<_> = self.block_spans().collect();
        for (block, (start, len)) in self.blocks.iter_mut().zip(spans) {
            let local_start = range.start.max(start).saturating_sub(start);
            let local_end = range.end.min(start + len).saturating_sub(start);
            block.map_styles(local_start, local_end, &mut f);
        }
    }

    /// Apply `f` to the style of every run in the document.
    pub fn map_all_styles(&mut self, mut f: impl FnMut(&mut RunStyle)) {
        for block in &mut self.blocks {
            for run in &mut block.runs {
                f(&mut run.style);
            }
            block.normalize();
        }
    }

    /// Indices of the blocks touched by `range`. A collapsed range touches the
    /// block holding the caret. A range ending where a block starts holds none
    /// of that block's text and leaves it out.
    pub fn block_indices(&self, range: CharRange) -> std::ops::Range<usize> {
        if self.blocks.is_empty() {
            return 0..0;
        }
        let (first, _) = self.locate(range.start);
        let end = if range.is_collapsed() {
            range.end
        } else {
            range.end - 1
        };
        let (last, _) = self.locate(end);
        first..last.max(first) + 1
    }

    /// Apply `f` to every block touched by `range`.
    pub fn map_blocks(&mut self, range: CharRange, mut f: impl FnMut(&mut Block)) {
        for index in self.block_indices(range) {
            if let Some(block) = self.blocks.get_mut(index) {
                f(block);
            }
        }
    }

    /// Replace `range` with `text`, returning the caret position after the
    /// inserted text.
    ///
    /// Inserted text takes `style`, or the style found at the start of the
    /// range. Newlines in `text` split blocks; deleting across a block
    /// boundary joins them.
    pub fn replace_range(&mut self, range: CharRange, text: &str, style: Option<RunStyle>) -> usize {
        self.normalize();
        let range = range.clamp(self.len_chars());
        let style = style.unwrap_or_else(|| self.style_at(range.start));
        self.delete_range(range);
        self.insert_text(range.start, text, style)
    }

    fn delete_range(&mut self, range: CharRange) {
        if range.is_collapsed() {
            return;
        }
        let (first, start) = self.locate(range.start);
        let (last, end) = self.locate(range.end);
        if first == last {
            self.blocks[first].remove(start, end);
            return;
        }
        let tail = self.blocks[last].split_off(end);
        self.blocks[first].split_off(start);
        self.blocks[first].runs.extend(tail);
        self.blocks[first].normalize();
        self.blocks.drain(first + 1..=last);
    }

    fn insert_text(&mut self, pos: usize, text: &str, style: RunStyle) -> usize {
        let (mut index, mut offset) = self.locate(pos);
        let mut caret = pos;
        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                let tail = self.blocks[index].split_off(offset);
                let next = Block {
                    kind: self.blocks[index].kind,
                    align: self.blocks[index].align,
                    runs: tail,
                };
                self.blocks.insert(index + 1, next);
                index += 1;
                offset = 0;
                caret += 1;
            }
            self.blocks[index].insert_text(offset, segment, style.clone());
            let len = segment.chars().count();
            offset += len;
            caret += len;
        }
        caret
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Changes
// ─────────────────────────────────────────────────────────────────────────────

/// The single contiguous edit turning one text into another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    /// Range of the old text that was replaced
    pub removed: CharRange,
    /// Text inserted in its place
    pub inserted: String,
}

impl TextChange {
    /// Diff `old` and `new` by their common prefix and suffix.
    ///
    /// Returns `None` when the texts are equal.
    pub fn between(old: &str, new: &str) -> Option<Self> {
        if old == new {
            return None;
        }
        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();

        let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
        let max_suffix = old.len().min(new.len()) - prefix;
        let suffix = old
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        Some(Self {
            removed: CharRange::new(prefix, old.len() - suffix),
            inserted: new[prefix..new.len() - suffix].iter().collect(),
        })
    }
}

/// Byte index of the character at `char_index`, or `s.len()` past the end.
pub fn byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map_or(s.len(), |(index, _)| index)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> RunStyle {
        RunStyle {
            bold: true,
            ..RunStyle::default()
        }
    }

    fn two_paragraphs() -> RichDocument {
        RichDocument::new(vec![
            Block::paragraph(vec![Run::new("Hello", bold()), Run::plain(" world")]),
            Block::paragraph(vec![Run::plain("Second")]),
        ])
    }

    #[test]
    fn test_color_hex_roundtrip() {
        let color = Color::rgb(232, 238, 252);
        assert_eq!(color.to_hex(), "#e8eefc");
        assert_eq!(Color::from_hex("#e8eefc"), Some(color));
        assert_eq!(Color::from_hex("#000"), Some(Color::BLACK));
        assert_eq!(Color::from_hex("e8eefc"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_plain_text_joins_blocks() {
        let doc = two_paragraphs();
        assert_eq!(doc.plain_text(), "Hello world\nSecond");
        assert_eq!(doc.len_chars(), 18);
    }

    #[test]
    fn test_new_without_blocks_is_placeholder() {
        let doc = RichDocument::new(Vec::new());
        assert_eq!(doc.blocks().len(), 1);
        assert!(doc.is_blank());
        assert_eq!(doc.len_chars(), 0);
    }

    #[test]
    fn test_is_blank_for_whitespace() {
        assert!(RichDocument::from_plain_text("   \n \t").is_blank());
        assert!(!RichDocument::from_plain_text(" a ").is_blank());
    }

    #[test]
    fn test_normalize_merges_equal_runs() {
        let block = Block::paragraph(vec![
            Run::plain("a"),
            Run::plain(""),
            Run::plain("b"),
            Run::new("c", bold()),
        ]);
        assert_eq!(block.runs.len(), 2);
        assert_eq!(block.runs[0].text, "ab");
    }

    #[test]
    fn test_map_styles_splits_runs() {
        let mut doc = RichDocument::from_plain_text("Hello world");
        doc.map_styles(CharRange::new(0, 5), |style| style.bold = true);

        let block = &doc.blocks()[0];
        assert_eq!(block.runs.len(), 2);
        assert_eq!(block.runs[0], Run::new("Hello", bold()));
        assert_eq!(block.runs[1], Run::plain(" world"));
    }

    #[test]
    fn test_map_styles_across_blocks() {
        let mut doc = two_paragraphs();
        doc.map_styles(CharRange::new(6, 15), |style| style.italic = true);

        let styles = doc.styles_in(CharRange::new(6, 15));
        assert!(styles.iter().all(|style| style.italic));
        assert_eq!(doc.blocks()[1].runs[0].text, "Sec");
        assert!(!doc.styles_in(CharRange::new(0, 5))[0].italic);
    }

    #[test]
    fn test_block_indices() {
        let doc = RichDocument::from_plain_text("one\ntwo");
        assert_eq!(doc.block_indices(CharRange::caret(2)), 0..1);
        assert_eq!(doc.block_indices(CharRange::caret(4)), 1..2);
        assert_eq!(doc.block_indices(CharRange::new(0, 7)), 0..2);
        assert_eq!(doc.block_indices(CharRange::new(3, 5)), 0..2);
    }

    #[test]
    fn test_block_indices_stop_at_block_boundary() {
        // "one" plus its line break, as Shift+Down selects it
        let doc = RichDocument::from_plain_text("one\ntwo");
        assert_eq!(doc.block_indices(CharRange::new(0, 4)), 0..1);

        let mut doc = doc;
        doc.map_blocks(CharRange::new(0, 4), |block| block.align = Alignment::Center);
        assert_eq!(doc.blocks()[0].align, Alignment::Center);
        assert_eq!(doc.blocks()[1].align, Alignment::Left);
    }

    #[test]
    fn test_styles_in_ignores_untouched_runs() {
        let doc = two_paragraphs();
        let styles = doc.styles_in(CharRange::new(0, 5));
        assert_eq!(styles.len(), 1);
        assert!(styles[0].bold);
    }

    #[test]
    fn test_style_at_inherits_previous_character() {
        let doc = two_paragraphs();
        assert!(doc.style_at(3).bold);
        assert!(doc.style_at(5).bold);
        assert!(!doc.style_at(6).bold);
        assert!(doc.style_at(0).bold);
    }

    #[test]
    fn test_style_at_empty_block_uses_previous_block() {
        let doc = RichDocument::new(vec![
            Block::paragraph(vec![Run::new("Hi", bold())]),
            Block::empty(),
        ]);
        assert!(doc.style_at(3).bold);
    }

    #[test]
    fn test_replace_range_inserts_with_inherited_style() {
        let mut doc = two_paragraphs();
        let caret = doc.replace_range(CharRange::caret(5), "!!", None);
        assert_eq!(caret, 7);
        assert_eq!(doc.plain_text(), "Hello!! world\nSecond");
        assert_eq!(doc.blocks()[0].runs[0], Run::new("Hello!!", bold()));
    }

    #[test]
    fn test_replace_range_newline_splits_block() {
        let mut doc = RichDocument::from_plain_text("Hello world");
        doc.map_blocks(CharRange::caret(0), |block| block.kind = BlockKind::BulletItem);

        let caret = doc.replace_range(CharRange::caret(5), "\n", None);
        assert_eq!(caret, 6);
        assert_eq!(doc.blocks().len(), 2);
        assert_eq!(doc.plain_text(), "Hello\n world");
        assert_eq!(doc.blocks()[1].kind, BlockKind::BulletItem);
    }

    #[test]
    fn test_replace_range_deleting_newline_joins_blocks() {
        let mut doc = two_paragraphs();
        doc.replace_range(CharRange::new(11, 12), "", None);
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.plain_text(), "Hello worldSecond");
    }

    #[test]
    fn test_replace_range_across_blocks() {
        let mut doc = two_paragraphs();
        let caret = doc.replace_range(CharRange::new(2, 15), "y", Some(RunStyle::default()));
        assert_eq!(doc.plain_text(), "Heyond");
        assert_eq!(caret, 3);
        assert_eq!(doc.blocks().len(), 1);
    }

    #[test]
    fn test_replace_range_out_of_bounds_clamps() {
        let mut doc = RichDocument::from_plain_text("abc");
        let caret = doc.replace_range(CharRange::new(2, 99), "Z", None);
        assert_eq!(doc.plain_text(), "abZ");
        assert_eq!(caret, 3);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut doc = RichDocument::from_plain_text("Hei på deg");
        doc.map_styles(CharRange::new(4, 6), |style| style.underline = true);
        assert_eq!(doc.blocks()[0].runs[1].text, "på");
        doc.replace_range(CharRange::new(5, 6), "ø", None);
        assert_eq!(doc.plain_text(), "Hei pø deg");
    }

    #[test]
    fn test_text_change_between() {
        let change = TextChange::between("Hello world", "Hello brave world").unwrap();
        assert_eq!(change.removed, CharRange::new(6, 6));
        assert_eq!(change.inserted, "brave ");

        let change = TextChange::between("aaa", "aa").unwrap();
        assert_eq!(change.removed.len(), 1);
        assert!(change.inserted.is_empty());

        assert!(TextChange::between("same", "same").is_none());
    }

    #[test]
    fn test_document_serialization_roundtrip() {
        let doc = two_paragraphs();
        let json = serde_json::to_string(&doc).unwrap();
        let restored: RichDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, restored);
    }

    #[test]
    fn test_deserialized_empty_document_is_usable() {
        let mut doc: RichDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.plain_text(), "");
        let caret = doc.replace_range(CharRange::caret(0), "x", None);
        assert_eq!(caret, 1);
        assert_eq!(doc.plain_text(), "x");
    }

    #[test]
    fn test_deserialized_zero_blocks() {
        let doc: RichDocument = serde_json::from_str(r#"{"blocks":[]}"#).unwrap();
        assert!(doc.blocks().is_empty());
        assert!(doc.is_blank());
        assert_eq!(doc.len_chars(), 0);
        assert!(doc.block_indices(CharRange::caret(0)).is_empty());
        assert_eq!(doc.style_at(0), RunStyle::default());
    }
}
