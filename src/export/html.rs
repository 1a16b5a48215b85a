//! HTML Generation
//!
//! Renders a [`RichDocument`] to inline-styled markup and wraps it in the
//! container used for email export. Everything is inline: email clients drop
//! `<style>` blocks and classes.

use super::options::ExportOptions;
use crate::content::{Block, BlockKind, FontSize, RichDocument, Run, RunStyle};

/// Placeholder block substituted for blank content.
pub const EMPTY_BLOCK: &str = "<div></div>";

// ─────────────────────────────────────────────────────────────────────────────
// Document Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render a document to the markup an editable region would hold.
///
/// Paragraphs become `<div>` (empty ones `<div><br></div>`), consecutive
/// bullet items share one `<ul>`.
pub fn render_document(document: &RichDocument) -> String {
    let mut html = String::new();
    let mut in_list = false;

    for block in document.blocks() {
        let tag = match block.kind {
            BlockKind::BulletItem => {
                if !in_list {
                    html.push_str("<ul>");
                    in_list = true;
                }
                "li"
            }
            BlockKind::Paragraph => {
                if in_list {
                    html.push_str("</ul>");
                    in_list = false;
                }
                "div"
            }
        };

        html.push('<');
        html.push_str(tag);
        if let Some(align) = block.align.css_value() {
            html.push_str(" style=\"text-align: ");
            html.push_str(align);
            html.push_str(";\"");
        }
        html.push('>');
        render_block_content(&mut html, block);
        html.push_str("</");
        html.push_str(tag);
        html.push('>');
    }

    if in_list {
        html.push_str("</ul>");
    }
    html
}

fn render_block_content(html: &mut String, block: &Block) {
    if block.is_empty() {
        html.push_str("<br>");
        return;
    }

    let mut spaces = SpaceState {
        previous_was_space: true,
        remaining: block.len_chars(),
    };
    for run in &block.runs {
        render_run(html, run, &mut spaces);
    }
}

fn render_run(html: &mut String, run: &Run, spaces: &mut SpaceState) {
    let mut inner = String::with_capacity(run.text.len());
    escape_text_into(&mut inner, &run.text, spaces);

    let style = &run.style;
    if style.underline {
        inner = format!("<u>{}</u>", inner);
    }
    if style.italic {
        inner = format!("<i>{}</i>", inner);
    }
    if style.bold {
        inner = format!("<b>{}</b>", inner);
    }
    html.push_str(&wrap_styled(inner, style));
}

/// Wrap rendered run content in its font element or styled span.
fn wrap_styled(inner: String, style: &RunStyle) -> String {
    if let Some(FontSize::Legacy(bucket)) = style.font_size {
        let mut open = format!("<font size=\"{}\"", bucket);
        if let Some(face) = &style.font_family {
            open.push_str(&format!(" face=\"{}\"", escape_attr(face)));
        }
        if let Some(color) = style.color {
            open.push_str(&format!(" color=\"{}\"", color.to_hex()));
        }
        return format!("{}>{}</font>", open, inner);
    }

    let declarations = css_declarations(style);
    if declarations.is_empty() {
        inner
    } else {
        format!(
            "<span style=\"{}\">{}</span>",
            escape_attr(&declarations),
            inner
        )
    }
}

/// Inline CSS for a run's family, pixel size and color.
fn css_declarations(style: &RunStyle) -> String {
    let mut declarations = Vec::new();
    if let Some(family) = &style.font_family {
        declarations.push(format!("font-family:{}", css_font_family(family)));
    }
    if let Some(FontSize::Px(px)) = style.font_size {
        declarations.push(format!("font-size:{}px", px));
    }
    if let Some(color) = style.color {
        declarations.push(format!("color:{}", color.to_hex()));
    }
    declarations.join(";")
}

fn css_font_family(family: &str) -> String {
    let family = family.trim();
    if family.contains(' ') && !family.starts_with(['\'', '"']) {
        format!("'{}'", family)
    } else {
        family.to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Email Container
// ─────────────────────────────────────────────────────────────────────────────

/// Wrap region markup in the email container.
///
/// Blank markup is replaced by [`EMPTY_BLOCK`]. The container declares the
/// base font stack, and in force-black mode a black text color.
pub fn wrap_for_email(content: &str, options: &ExportOptions) -> String {
    let content = if content.trim().is_empty() {
        EMPTY_BLOCK
    } else {
        content.trim()
    };

    let mut style = format!("font-family: {};", options.base_font_stack.trim());
    if let Some(color) = options.forced_color() {
        style.push_str(&format!(" color: {};", color.to_hex()));
    }

    format!(
        "<div style=\"{}\">\n{}\n</div>",
        escape_attr(&style),
        content
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Tracks whitespace across runs so repeated, leading and trailing spaces
/// survive HTML whitespace collapsing.
struct SpaceState {
    previous_was_space: bool,
    remaining: usize,
}

fn escape_text_into(out: &mut String, text: &str, spaces: &mut SpaceState) {
    for c in text.chars() {
        spaces.remaining = spaces.remaining.saturating_sub(1);
        match c {
            ' ' if spaces.previous_was_space || spaces.remaining == 0 => out.push_str("&nbsp;"),
            '\t' => out.push_str("&nbsp;&nbsp;&nbsp;&nbsp;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
        spaces.previous_was_space = c == ' ';
    }
}

/// Escape a double-quoted attribute value.
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
