//! User settings and preferences for RichCopy
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON configuration files.

use crate::export::options::{ColorMode, ExportOptions, DEFAULT_BASE_FONT_STACK};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    /// egui visuals for this theme. `System` follows the platform preference
    /// when eframe reports one.
    pub fn visuals(&self, system_dark: Option<bool>) -> eframe::egui::Visuals {
        let dark = match self {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => system_dark.unwrap_or(false),
        };
        if dark {
            eframe::egui::Visuals::dark()
        } else {
            eframe::egui::Visuals::light()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Toolbar Options
// ─────────────────────────────────────────────────────────────────────────────

/// An entry of the font menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontOption {
    /// Text shown in the menu
    pub label: String,
    /// Family name applied to the text
    pub value: String,
}

impl FontOption {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

fn default_font_options() -> Vec<FontOption> {
    vec![
        FontOption::new("Segoe UI (Outlook)", "Segoe UI"),
        FontOption::new("Arial", "Arial"),
        FontOption::new("Calibri", "Calibri"),
        FontOption::new("Verdana", "Verdana"),
        FontOption::new("Georgia", "Georgia"),
        FontOption::new("Times New Roman", "Times New Roman"),
        FontOption::new("Courier New", "Courier New"),
    ]
}

fn default_size_options() -> Vec<u32> {
    vec![12, 14, 16, 18, 20, 24, 28, 32]
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Initial window dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 860.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// Read from the user's config directory at startup. All fields have
/// sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Appearance
    // ─────────────────────────────────────────────────────────────────────────
    /// Color theme (light, dark, or system)
    pub theme: Theme,

    /// Initial window size
    pub window_size: WindowSize,

    /// Number of panels in the grid
    pub panel_count: usize,

    /// How long a toast stays visible, in seconds
    pub toast_duration_secs: f32,

    // ─────────────────────────────────────────────────────────────────────────
    // Formatting
    // ─────────────────────────────────────────────────────────────────────────
    /// Text color policy
    pub color_mode: ColorMode,

    /// Font stack of the exported container
    pub base_font_stack: String,

    /// Font of new panels
    pub default_font: String,

    /// Font size of new panels, in pixels
    pub default_size_px: u32,

    /// Font menu entries
    pub font_options: Vec<FontOption>,

    /// Size menu entries, in pixels
    pub size_options: Vec<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Appearance
            theme: Theme::default(),
            window_size: WindowSize::default(),
            panel_count: 4,
            toast_duration_secs: 1.4,

            // Formatting
            color_mode: ColorMode::default(),
            base_font_stack: DEFAULT_BASE_FONT_STACK.to_string(),
            default_font: String::from("Segoe UI"),
            default_size_px: 14,
            font_options: default_font_options(),
            size_options: default_size_options(),
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum number of panels.
    pub const MIN_PANELS: usize = 1;
    /// Maximum number of panels.
    pub const MAX_PANELS: usize = 8;
    /// Minimum allowed font size in pixels.
    pub const MIN_SIZE_PX: u32 = 8;
    /// Maximum allowed font size in pixels.
    pub const MAX_SIZE_PX: u32 = 96;
    /// Minimum toast duration.
    pub const MIN_TOAST_SECS: f32 = 0.5;
    /// Maximum toast duration.
    pub const MAX_TOAST_SECS: f32 = 10.0;
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 400.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// Config files are edited by hand, so anything may be in them.
    pub fn sanitize(&mut self) {
        self.panel_count = self.panel_count.clamp(Self::MIN_PANELS, Self::MAX_PANELS);

        // NaN clamps to NaN
        if !self.toast_duration_secs.is_finite() {
            self.toast_duration_secs = 1.4;
        }
        self.toast_duration_secs = self
            .toast_duration_secs
            .clamp(Self::MIN_TOAST_SECS, Self::MAX_TOAST_SECS);

        for dimension in [&mut self.window_size.width, &mut self.window_size.height] {
            if !dimension.is_finite() {
                *dimension = Self::MIN_WINDOW_SIZE;
            }
            *dimension = dimension.clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        }

        if self.base_font_stack.trim().is_empty() {
            self.base_font_stack = DEFAULT_BASE_FONT_STACK.to_string();
        }

        self.font_options
            .retain(|option| !option.value.trim().is_empty());
        if self.font_options.is_empty() {
            self.font_options = default_font_options();
        }
        if self.default_font.trim().is_empty() {
            self.default_font = self.font_options[0].value.clone();
        }

        self.size_options
            .retain(|px| (Self::MIN_SIZE_PX..=Self::MAX_SIZE_PX).contains(px));
        self.size_options.sort_unstable();
        self.size_options.dedup();
        if self.size_options.is_empty() {
            self.size_options = default_size_options();
        }
        self.default_size_px = self
            .default_size_px
            .clamp(Self::MIN_SIZE_PX, Self::MAX_SIZE_PX);
    }

    /// Load settings and sanitize them to ensure validity.
    ///
    /// This is a convenience method that deserializes and then sanitizes.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Export options every panel starts with.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            base_font_stack: self.base_font_stack.clone(),
            ..ExportOptions::default()
        }
        .with_color_mode(self.color_mode)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
