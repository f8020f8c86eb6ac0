//! Explorer Main Application
//! Owns the loader, exporter, and filtered state; wires control panel
//! actions into pipeline re-runs.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use egui::{Color32, RichText, SidePanel};

use crate::data::{filtered_indices, CacheStatus, DataLoader, PaperSet};
use crate::export::{CsvExporter, EXPORT_FILE_NAME};
use crate::gui::{ControlPanel, ControlPanelAction, Dashboard};

/// Input data set, expected in the working directory.
pub const DATA_FILE: &str = "metadata.csv";

/// Main application window.
pub struct ExplorerApp {
    loader: DataLoader,
    exporter: CsvExporter,
    papers: Option<Arc<PaperSet>>,
    visible: Vec<usize>,
    fatal: Option<String>,
    control_panel: ControlPanel,
    dashboard: Dashboard,
}

impl ExplorerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            loader: DataLoader::new(),
            exporter: CsvExporter::new(),
            papers: None,
            visible: Vec::new(),
            fatal: None,
            control_panel: ControlPanel::new(),
            dashboard: Dashboard::new(),
        };
        app.load_data();
        app
    }

    /// Load (or reload) the dataset through the memoizing loader, then
    /// re-run the pipeline. A load failure is fatal for the dashboard.
    fn load_data(&mut self) {
        match self.loader.load(Path::new(DATA_FILE)) {
            Ok((papers, status)) => {
                self.fatal = None;
                self.control_panel.data_ready = true;
                match status {
                    CacheStatus::Parsed => self
                        .control_panel
                        .set_status(&format!("Loaded {} records", papers.len())),
                    CacheStatus::Hit | CacheStatus::ContentMatch => self
                        .control_panel
                        .set_status("Data unchanged, reusing cached records"),
                }
                self.papers = Some(papers);
                self.run_pipeline();
            }
            Err(e) => {
                log::error!("failed to load {DATA_FILE}: {e}");
                self.fatal = Some(e.to_string());
            }
        }
    }

    /// Filter → aggregate, from the current range down. Everything below the
    /// range control is recomputed; the loader is never touched here.
    fn run_pipeline(&mut self) {
        let Some(papers) = &self.papers else {
            return;
        };
        let range = self.control_panel.range;
        self.visible = filtered_indices(papers, range);
        log::debug!(
            "{} of {} papers in range [{}, {}]",
            self.visible.len(),
            papers.len(),
            range.lo,
            range.hi
        );
        self.control_panel.visible = self.visible.len();
        self.control_panel.total = papers.len();
        self.dashboard.rebuild(papers, &self.visible, range);
    }

    /// Export the filtered view to a user-chosen CSV file.
    fn handle_export(&mut self) {
        let Some(papers) = self.papers.clone() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(EXPORT_FILE_NAME)
            .save_file()
        else {
            return; // User cancelled
        };

        match self.export_to(&papers, &path) {
            Ok(rows) => {
                self.control_panel.set_status(&format!(
                    "Exported {} rows to {}",
                    rows,
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("export failed: {e:#}");
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
    }

    fn export_to(&mut self, papers: &Arc<PaperSet>, path: &Path) -> anyhow::Result<usize> {
        let range = self.control_panel.range;
        let bytes = self.exporter.export(papers, &self.visible, range)?;
        std::fs::write(path, bytes.as_slice())
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(self.visible.len())
    }

    /// Failure page shown when the dataset cannot be loaded at all.
    fn show_fatal_page(&mut self, ctx: &egui::Context, message: String) {
        let mut retry = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.3);
                ui.heading(
                    RichText::new("⚠ Cannot start the dashboard")
                        .color(Color32::from_rgb(220, 53, 69)),
                );
                ui.add_space(8.0);
                ui.label(message);
                ui.add_space(4.0);
                ui.label(format!(
                    "Place '{DATA_FILE}' in the working directory, then retry."
                ));
                ui.add_space(12.0);
                if ui.button("Retry").clicked() {
                    retry = true;
                }
            });
        });
        if retry {
            self.load_data();
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(message) = self.fatal.clone() {
            self.show_fatal_page(ctx, message);
            return;
        }

        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::RangeChanged => self.run_pipeline(),
                        ControlPanelAction::Reload => self.load_data(),
                        ControlPanelAction::Export => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui);
        });
    }
}
