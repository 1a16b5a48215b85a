//! Main application module for RichCopy
//!
//! This module implements the eframe App trait for the main application:
//! the panel grid, deferred toolbar actions and the toast overlay.

use crate::config::Settings;
use crate::content::{PageSelection, PanelId};
use crate::editor::{EditorWidget, Panel};
use crate::export::{ClipboardPublisher, ColorMode};
use crate::formatting::FormatCommand;
use crate::ui::{FormattingState, Toast, Toolbar, ToolbarAction};
use eframe::egui::{self, Color32, RichText};
use log::{debug, info};
use std::time::{Duration, Instant};

/// Subtitle under every panel title.
const PANEL_SUBTITLE: &str = "Rich text editor (Outlook-friendly copy)";

/// Hint under every editor.
const PANEL_HINT: &str = "Tip: Click inside the editor first, then use the toolbar for best results.";

/// Panels per grid row.
const GRID_COLUMNS: usize = 2;

/// Panel actions that need to be deferred.
///
/// These actions are collected while the panels render and executed
/// afterwards, once every editor has reported its selection.
#[derive(Debug, Clone)]
enum PanelAction {
    /// Toolbar button or menu
    Toolbar(ToolbarAction),
    /// Formatting shortcut pressed in the editor
    Shortcut(FormatCommand),
    /// COPY button
    Copy,
}

/// The main application struct that holds all state and implements eframe::App.
pub struct RichCopyApp {
    /// Settings read at startup
    settings: Settings,
    /// One entry per editable panel
    panels: Vec<Panel>,
    /// The selection shared by all panels
    selection: PageSelection,
    /// Writes exports to the system clipboard
    publisher: ClipboardPublisher,
    /// Copy status notification
    toast: Toast,
    /// Application start time for timing toast messages
    start_time: Instant,
}

impl RichCopyApp {
    /// Create a new RichCopyApp instance from the loaded settings.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing RichCopy with {} panel(s)", settings.panel_count);

        let system_dark = Some(cc.egui_ctx.style().visuals.dark_mode);
        cc.egui_ctx.set_visuals(settings.theme.visuals(system_dark));
        info!("Applied initial theme: {:?}", settings.theme);

        let panels = (0..settings.panel_count)
            .map(|index| {
                Panel::new(
                    PanelId(index),
                    settings.export_options(),
                    &settings.default_font,
                    settings.default_size_px,
                )
            })
            .collect();

        Self {
            toast: Toast::new(f64::from(settings.toast_duration_secs)),
            settings,
            panels,
            selection: PageSelection::new(),
            publisher: ClipboardPublisher::system(),
            start_time: Instant::now(),
        }
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Render the window. Returns the actions triggered this frame.
    fn render_ui(&mut self, ctx: &egui::Context) -> Vec<(usize, PanelAction)> {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("RichCopy");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut mode = self.settings.color_mode;
                    egui::ComboBox::from_id_source("color_mode")
                        .selected_text(mode.label())
                        .show_ui(ui, |ui| {
                            for option in [ColorMode::Custom, ColorMode::ForceBlack] {
                                ui.selectable_value(&mut mode, option, option.label());
                            }
                        });
                    ui.label("Text color:");
                    if mode != self.settings.color_mode {
                        self.set_color_mode(mode);
                    }
                });
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let settings = &self.settings;
                let selection = &mut self.selection;

                for (row, chunk) in self.panels.chunks_mut(GRID_COLUMNS).enumerate() {
                    ui.columns(GRID_COLUMNS, |columns| {
                        for (column, panel) in chunk.iter_mut().enumerate() {
                            let index = row * GRID_COLUMNS + column;
                            let ui = &mut columns[column];
                            for action in show_panel(ui, index, panel, selection, settings) {
                                actions.push((index, action));
                            }
                        }
                    });
                    ui.add_space(8.0);
                }
            });
        });

        actions
    }

    /// Show the toast over the bottom of the window while it is visible.
    fn render_toast(&self, ctx: &egui::Context) {
        let Some(message) = self.toast.message() else {
            return;
        };

        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(RichText::new(message).strong().size(14.0));
                });
            });

        if let Some(remaining) = self.toast.remaining() {
            ctx.request_repaint_after(Duration::from_secs_f64(remaining));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_panel_action(&mut self, index: usize, action: PanelAction) {
        let Some(panel) = self.panels.get_mut(index) else {
            return;
        };
        debug!("{}: {:?}", panel.id(), action);

        match action {
            PanelAction::Toolbar(ToolbarAction::Format(command)) | PanelAction::Shortcut(command) => {
                panel.apply_formatting(&command, &mut self.selection);
            }
            PanelAction::Toolbar(ToolbarAction::Font(name)) => {
                panel.apply_font(&name, &mut self.selection);
            }
            PanelAction::Toolbar(ToolbarAction::Size(px)) => {
                panel.apply_size(px, &mut self.selection);
            }
            PanelAction::Toolbar(ToolbarAction::Color(color)) => {
                panel.apply_color(color, &mut self.selection);
            }
            PanelAction::Copy => {
                let outcome =
                    panel.copy_to_clipboard(&mut self.publisher, &mut self.selection, &mut self.toast);
                info!("{} copied: {:?}", panel.id(), outcome);
            }
        }
    }

    fn set_color_mode(&mut self, mode: ColorMode) {
        info!("Text color mode: {}", mode.label());
        self.settings.color_mode = mode;
        for panel in &mut self.panels {
            panel.set_color_mode(mode);
        }
    }
}

/// Render one panel: header, toolbar, editor, hint and COPY button.
fn show_panel(
    ui: &mut egui::Ui,
    index: usize,
    panel: &mut Panel,
    selection: &mut PageSelection,
    settings: &Settings,
) -> Vec<PanelAction> {
    let mut actions = Vec::new();
    let is_dark = ui.visuals().dark_mode;
    let secondary_color = if is_dark {
        Color32::from_rgb(160, 160, 160)
    } else {
        Color32::from_rgb(90, 90, 90)
    };
    let badge_color = if is_dark {
        Color32::from_rgb(70, 90, 120)
    } else {
        Color32::from_rgb(66, 110, 200)
    };

    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            // Header
            ui.horizontal(|ui| {
                egui::Frame::none()
                    .fill(badge_color)
                    .rounding(10.0)
                    .inner_margin(egui::Margin::symmetric(7.0, 2.0))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(panel.id().number().to_string())
                                .strong()
                                .color(Color32::WHITE),
                        );
                    });
                ui.vertical(|ui| {
                    ui.label(RichText::new(panel.id().to_string()).strong().size(15.0));
                    ui.label(RichText::new(PANEL_SUBTITLE).small().color(secondary_color));
                });
            });
            ui.add_space(6.0);

            // Toolbar
            let state = FormattingState::detect(
                panel.document(),
                selection.range_in(panel.id()),
                panel.typing_style(),
            );
            let toolbar = Toolbar::new(
                egui::Id::new(("toolbar", index)),
                &settings.font_options,
                &settings.size_options,
            )
            .color_picker(panel.options().color_mode.allows_color_picker());
            if let Some(action) = toolbar.show(ui, &panel.font, panel.size_px, panel.color, state) {
                actions.push(PanelAction::Toolbar(action));
            }
            ui.add_space(4.0);

            // Editor
            let output = EditorWidget::new(panel, selection)
                .id(egui::Id::new(("panel_editor", index)))
                .font_size(settings.default_size_px as f32)
                .desired_rows(8)
                .show(ui);
            if let Some(command) = output.shortcut {
                actions.push(PanelAction::Shortcut(command));
            }

            ui.label(RichText::new(PANEL_HINT).small().italics().color(secondary_color));
            ui.add_space(4.0);

            let copy = egui::Button::new(RichText::new("COPY").strong()).min_size(egui::vec2(90.0, 28.0));
            if ui.add(copy).on_hover_text("Copy with formatting").clicked() {
                actions.push(PanelAction::Copy);
            }
        });

    actions
}

impl eframe::App for RichCopyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Update toast message (clear if expired)
        let current_time = self.get_app_time();
        self.toast.update(current_time);

        // Render the panels (this updates the page selection)
        let actions = self.render_ui(ctx);

        // Handle deferred actions AFTER render so the selection is up-to-date
        for (index, action) in actions {
            self.handle_panel_action(index, action);
        }

        self.render_toast(ctx);
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
    }
}

