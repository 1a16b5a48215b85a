//! Font size normalization.
//!
//! The size command only understands the legacy 1-7 magnitude scale, and
//! email clients render those markers inconsistently. Sizes are therefore
//! applied in two steps: the pixel size is mapped to a bucket and applied,
//! then every legacy marker is rewritten to an explicit pixel size.

use super::command::{execute, FormatCommand, FormatResult};
use crate::content::{CharRange, FontSize, RichDocument, RunStyle};
use log::debug;

/// Threshold ladder: the first threshold not exceeded picks the bucket.
const SIZE_LADDER: [(u32, u8); 5] = [(12, 2), (14, 3), (16, 4), (18, 5), (24, 6)];

/// Bucket for sizes above the largest threshold.
pub const TOP_SIZE_BUCKET: u8 = 7;

/// Map a pixel size to the legacy 1-7 size bucket.
pub fn legacy_size_bucket(px: u32) -> u8 {
    SIZE_LADDER
        .iter()
        .find(|(threshold, _)| px <= *threshold)
        .map_or(TOP_SIZE_BUCKET, |(_, bucket)| *bucket)
}

/// Nominal pixel size of a legacy bucket, for on-screen display of content
/// that has not been normalized yet.
pub fn legacy_bucket_px(bucket: u8) -> u32 {
    match bucket {
        0 | 1 => 10,
        2 => 13,
        3 => 16,
        4 => 18,
        5 => 24,
        6 => 32,
        _ => 48,
    }
}

/// Apply a pixel font size to `selection`.
pub fn apply_font_size_px(
    document: &RichDocument,
    selection: Option<CharRange>,
    px: u32,
) -> FormatResult {
    let bucket = legacy_size_bucket(px);
    let mut result = execute(document, selection, &FormatCommand::FontSize(bucket));

    let replaced = normalize_legacy_sizes(&mut result.document, px);
    if let Some(style) = result.typing_style.as_mut() {
        normalize_style(style, px);
    }
    debug!(
        "Font size {}px (bucket {}): normalized {} run(s)",
        px, bucket, replaced
    );
    result
}

/// Replace every legacy size marker in `document` with `px`, returning the
/// number of runs rewritten. Family and color on the run are kept.
///
/// Running this on already normalized content changes nothing.
pub fn normalize_legacy_sizes(document: &mut RichDocument, px: u32) -> usize {
    let mut replaced = 0;
    document.map_all_styles(|style| {
        if normalize_style(style, px) {
            replaced += 1;
        }
    });
    replaced
}

fn normalize_style(style: &mut RunStyle, px: u32) -> bool {
    if let Some(FontSize::Legacy(_)) = style.font_size {
        style.font_size = Some(FontSize::Px(px));
        true
    } else {
        false
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
