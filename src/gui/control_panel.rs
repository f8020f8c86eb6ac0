//! Control Panel Widget
//! Left side panel with the year-range control, reload, and download.

use egui::{Color32, RichText};

use crate::data::{YearRange, YEAR_MAX, YEAR_MIN};

/// Actions triggered by control panel interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    RangeChanged,
    Reload,
    Export,
}

/// Left side panel: range sliders, record counts, actions, status.
pub struct ControlPanel {
    pub range: YearRange,
    pub total: usize,
    pub visible: usize,
    pub data_ready: bool,
    status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            range: YearRange::default(),
            total: 0,
            visible: 0,
            data_ready: false,
            status: "Loading...".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 CORD-19 Explorer")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(8.0);

        // ===== Year range =====
        ui.label(RichText::new("📅 Publication Years").size(14.0).strong());
        ui.add_space(5.0);

        let mut lo = self.range.lo;
        let mut hi = self.range.hi;
        let lo_changed = ui
            .add(egui::Slider::new(&mut lo, YEAR_MIN..=YEAR_MAX).text("From"))
            .changed();
        let hi_changed = ui
            .add(egui::Slider::new(&mut hi, YEAR_MIN..=YEAR_MAX).text("To"))
            .changed();

        // Dragging one bound past the other pushes the other along so the
        // range stays inclusive and ordered.
        if lo_changed {
            self.range.lo = lo;
            if self.range.hi < lo {
                self.range.hi = lo;
            }
        }
        if hi_changed {
            self.range.hi = hi;
            if self.range.lo > hi {
                self.range.lo = hi;
            }
        }
        if lo_changed || hi_changed {
            action = ControlPanelAction::RangeChanged;
        }

        ui.add_space(8.0);
        ui.label(format!("{} of {} papers in range", self.visible, self.total));

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Actions =====
        ui.vertical_centered(|ui| {
            if ui
                .add(
                    egui::Button::new(RichText::new("⟳ Reload Data").size(14.0))
                        .min_size(egui::vec2(170.0, 30.0)),
                )
                .clicked()
            {
                action = ControlPanelAction::Reload;
            }

            ui.add_space(8.0);

            ui.add_enabled_ui(self.data_ready, |ui| {
                if ui
                    .add(
                        egui::Button::new(RichText::new("⬇ Download CSV").size(14.0))
                            .min_size(egui::vec2(170.0, 30.0)),
                    )
                    .clicked()
                {
                    action = ControlPanelAction::Export;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(8.0);

        // ===== Status =====
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") || self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}
