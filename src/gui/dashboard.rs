//! Dashboard View
//! Central scrollable page: page title, intro line, data preview table,
//! the three distribution charts, and the title word cloud.

use egui::{Color32, Grid, RichText, ScrollArea};

use crate::charts::{word_frequencies, ChartPlotter, WordCloud};
use crate::data::processor::{self, PreviewRow};
use crate::data::{PaperSet, YearRange};

pub const PAGE_TITLE: &str = "CORD-19 Data Explorer";
const INTRO_TEXT: &str = "Explore COVID-19 research metadata from the CORD-19 dataset.";

const PREVIEW_LIMIT: usize = 20;
const TOP_JOURNALS: usize = 10;
const MAX_CLOUD_WORDS: usize = 80;
const TITLE_CELL_MAX_CHARS: usize = 90;

/// Aggregates for one pipeline run. Rebuilt when the range changes rather
/// than recomputed every frame.
struct DashboardData {
    range: YearRange,
    preview: Vec<PreviewRow>,
    year_counts: Vec<(i32, usize)>,
    top_journals: Vec<(String, usize)>,
    words: Vec<(String, usize)>,
    source_counts: Vec<(String, usize)>,
    visible: usize,
}

/// Central panel renderer for the filtered view.
#[derive(Default)]
pub struct Dashboard {
    data: Option<DashboardData>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute every view aggregate from the filtered indices.
    pub fn rebuild(&mut self, papers: &PaperSet, indices: &[usize], range: YearRange) {
        self.data = Some(DashboardData {
            range,
            preview: processor::preview_rows(papers, indices, PREVIEW_LIMIT),
            year_counts: processor::publications_by_year(papers, indices),
            top_journals: processor::top_journals(papers, indices, TOP_JOURNALS),
            words: word_frequencies(papers, indices, MAX_CLOUD_WORDS),
            source_counts: processor::source_counts(papers, indices),
            visible: indices.len(),
        });
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(data) = &self.data else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(8.0);
                ui.heading(RichText::new(PAGE_TITLE).size(26.0).strong());
                ui.label(INTRO_TEXT);
                ui.add_space(12.0);
                ui.separator();
                ui.add_space(8.0);

                Self::section_heading(
                    ui,
                    &format!("Papers from {} to {}", data.range.lo, data.range.hi),
                );
                if data.visible == 0 {
                    ui.label(
                        RichText::new("No papers in the selected range.")
                            .color(Color32::GRAY),
                    );
                }
                Self::draw_preview_table(ui, &data.preview);

                ui.add_space(16.0);
                Self::section_heading(ui, "Publications by Year");
                ChartPlotter::draw_year_chart(ui, &data.year_counts);

                ui.add_space(16.0);
                Self::section_heading(ui, "Top Journals");
                ChartPlotter::draw_journal_chart(ui, &data.top_journals);

                ui.add_space(16.0);
                Self::section_heading(ui, "Word Cloud of Paper Titles");
                WordCloud::show(ui, &data.words);

                ui.add_space(16.0);
                Self::section_heading(ui, "Distribution by Source");
                ChartPlotter::draw_source_chart(ui, &data.source_counts);

                ui.add_space(24.0);
            });
    }

    fn section_heading(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).size(17.0).strong());
        ui.add_space(4.0);
    }

    fn draw_preview_table(ui: &mut egui::Ui, rows: &[PreviewRow]) {
        Grid::new("paper_preview")
            .striped(true)
            .num_columns(3)
            .min_col_width(60.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Title").strong());
                ui.label(RichText::new("Journal").strong());
                ui.label(RichText::new("Year").strong());
                ui.end_row();

                for row in rows {
                    ui.label(cell_text(row.title.as_deref()));
                    ui.label(cell_text(row.journal.as_deref()));
                    ui.label(
                        row.year
                            .map(|y| y.to_string())
                            .unwrap_or_else(|| "—".to_string()),
                    );
                    ui.end_row();
                }
            });
    }
}

fn cell_text(value: Option<&str>) -> String {
    match value {
        Some(text) if text.chars().count() > TITLE_CELL_MAX_CHARS => {
            let head: String = text.chars().take(TITLE_CELL_MAX_CHARS - 1).collect();
            format!("{head}…")
        }
        Some(text) => text.to_string(),
        None => "—".to_string(),
    }
}
