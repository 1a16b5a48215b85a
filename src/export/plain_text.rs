//! Plain-text reading of exported markup.
//!
//! Produces the text a reader would see in the rendered HTML: tags removed,
//! entities decoded, runs of whitespace collapsed, one line break per block
//! boundary. Works on any input string and never panics.

use html2text::render::TrivialDecorator;
use log::warn;

/// Render width. Wide enough that email paragraphs are never wrapped.
const RENDER_WIDTH: usize = 10_000;

/// Derive the plain-text representation of `html`.
pub fn html_to_plain_text(html: &str) -> String {
    let rendered = html2text::config::with_decorator(TrivialDecorator::new())
        .raw_mode(true)
        .allow_width_overflow()
        .string_from_read(html.as_bytes(), RENDER_WIDTH);

    match rendered {
        Ok(text) => tidy_lines(&text),
        Err(e) => {
            warn!("Failed to derive plain text: {}", e);
            String::new()
        }
    }
}

/// Turn non-breaking spaces into plain ones and drop blank lines at either
/// end. Spaces inside a line, including its edges, are content and stay.
fn tidy_lines(rendered: &str) -> String {
    let lines: Vec<String> = rendered
        .lines()
        .map(|line| line.replace('\u{a0}', " "))
        .collect();

    let is_blank = |line: &String| line.trim().is_empty();
    let Some(first) = lines.iter().position(|line| !is_blank(line)) else {
        return String::new();
    };
    let last = lines.iter().rposition(|line| !is_blank(line)).unwrap_or(first);
    lines[first..=last].join("\n")
}

/// True when `text` holds something an HTML parser would read as a tag.
#[cfg(test)]
pub(super) fn contains_tag(text: &str) -> bool {
    text.as_bytes()
        .windows(2)
        .any(|pair| pair[0] == b'<' && (pair[1].is_ascii_alphabetic() || pair[1] == b'/'))
}
