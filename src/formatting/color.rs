//! Text color forcing for email export.

use crate::content::{Color, RichDocument};

/// Force every run in `document` to `color`, returning how many runs changed.
///
/// Applying it a second time changes nothing.
pub fn force_color(document: &mut RichDocument, color: Color) -> usize {
    let mut changed = 0;
    document.map_all_styles(|style| {
        if style.color != Some(color) {
            style.color = Some(color);
            changed += 1;
        }
    });
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Block, Run, RunStyle};

    fn colorful() -> RichDocument {
        let red = RunStyle {
            color: Some(Color::rgb(200, 0, 0)),
            ..RunStyle::default()
        };
        RichDocument::new(vec![
            Block::paragraph(vec![Run::new("red", red), Run::plain(" plain")]),
            Block::paragraph(vec![Run::plain("next")]),
        ])
    }

    #[test]
    fn test_force_color_reaches_every_run() {
        let mut doc = colorful();
        assert_eq!(force_color(&mut doc, Color::BLACK), 3);

        for block in doc.blocks() {
            for run in &block.runs {
                assert_eq!(run.style.color, Some(Color::BLACK));
            }
        }
        // Equal styles merge once forced
        assert_eq!(doc.blocks()[0].runs.len(), 1);
    }

    #[test]
    fn test_force_color_is_idempotent() {
        let mut once = colorful();
        force_color(&mut once, Color::BLACK);
        let mut twice = once.clone();

        assert_eq!(force_color(&mut twice, Color::BLACK), 0);
        assert_eq!(once, twice);
    }
}
