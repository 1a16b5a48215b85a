//! Email-safe export of panel content.

use super::html::{render_document, wrap_for_email};
use super::options::ExportOptions;
use super::plain_text::html_to_plain_text;
use crate::content::RichDocument;
use crate::formatting::force_color;
use log::debug;

/// The two clipboard representations of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailExport {
    /// Wrapped, inline-styled markup
    pub html: String,
    /// Rendered-text reading of `html`
    pub text: String,
}

/// Export already rendered region markup.
pub fn export_markup(raw: &str, options: &ExportOptions) -> EmailExport {
    let html = wrap_for_email(raw, options);
    let text = html_to_plain_text(&html);
    EmailExport { html, text }
}

/// Export a document. The document itself is left untouched; in force-black
/// mode a copy is recolored before rendering.
pub fn export_document(document: &RichDocument, options: &ExportOptions) -> EmailExport {
    let raw = if document.is_blank() {
        String::new()
    } else if let Some(color) = options.forced_color() {
        let mut forced = document.clone();
        let changed = force_color(&mut forced, color);
        debug!("Forced {} run(s) to {} for export", changed, color.to_hex());
        render_document(&forced)
    } else {
        render_document(document)
    };
    export_markup(&raw, options)
}
