//! Export Options and Configuration
//!
//! This module defines how panel content is shaped for email clients: the
//! base font stack of the wrapping container and the text color policy.

use crate::content::Color;
use serde::{Deserialize, Serialize};

/// Font stack on the export container when none is configured.
pub const DEFAULT_BASE_FONT_STACK: &str = "Segoe UI, Arial, sans-serif";

// ─────────────────────────────────────────────────────────────────────────────
// Color Mode
// ─────────────────────────────────────────────────────────────────────────────

/// Text color policy for panels and exported HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Users pick text colors from the toolbar
    #[default]
    Custom,
    /// All text is forced to black, both after size changes and on copy
    ForceBlack,
}

impl ColorMode {
    /// Get the display label for this mode.
    pub fn label(&self) -> &'static str {
        match self {
            ColorMode::Custom => "Custom colors",
            ColorMode::ForceBlack => "Always black",
        }
    }

    /// Color every run is forced to, if any.
    pub fn forced_color(&self) -> Option<Color> {
        match self {
            ColorMode::Custom => None,
            ColorMode::ForceBlack => Some(Color::BLACK),
        }
    }

    /// Whether the toolbar offers a color picker.
    pub fn allows_color_picker(&self) -> bool {
        *self == ColorMode::Custom
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Export Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for email export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Font stack declared on the wrapping container
    pub base_font_stack: String,

    /// Text color policy
    pub color_mode: ColorMode,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            base_font_stack: DEFAULT_BASE_FONT_STACK.to_string(),
            color_mode: ColorMode::default(),
        }
    }
}

impl ExportOptions {
    /// Set the color mode.
    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    /// Color forced onto the container and every run, if any.
    pub fn forced_color(&self) -> Option<Color> {
        self.color_mode.forced_color()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
