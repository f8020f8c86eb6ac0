//! Chart Plotter Module
//! Interactive bar charts over the filtered dataset using egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, Plot};

/// Bar colors for the three distribution charts.
pub const YEAR_COLOR: Color32 = Color32::from_rgb(243, 156, 18); // Orange
pub const JOURNAL_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green
pub const SOURCE_COLOR: Color32 = Color32::from_rgb(155, 89, 182); // Purple

/// Word cloud color palette (cycled by placement order).
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

const CHART_HEIGHT: f32 = 280.0;
const AXIS_LABEL_MAX_CHARS: usize = 24;

/// Renders the dashboard's bar charts. An empty input set draws an empty
/// plot frame rather than erroring.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Vertical bar chart of paper counts per year, years ascending.
    pub fn draw_year_chart(ui: &mut egui::Ui, counts: &[(i32, usize)]) {
        let bars: Vec<Bar> = counts
            .iter()
            .map(|&(year, count)| {
                Bar::new(year as f64, count as f64)
                    .width(0.6)
                    .name(format!("{year}"))
            })
            .collect();

        Plot::new("publications_by_year")
            .height(CHART_HEIGHT)
            .x_axis_label("Year")
            .y_axis_label("Number of Papers")
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| {
                // Only label whole years; bars sit on integer positions.
                if (mark.value - mark.value.round()).abs() < 1e-6 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(YEAR_COLOR)
                        .name("Publications"),
                );
            });
    }

    /// Horizontal bar chart of the top journals, highest count at the top.
    pub fn draw_journal_chart(ui: &mut egui::Ui, counts: &[(String, usize)]) {
        let n = counts.len();
        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, (journal, count))| {
                // Counts arrive descending; flip so the largest sits on top.
                Bar::new((n - 1 - i) as f64, *count as f64)
                    .width(0.6)
                    .name(journal.clone())
            })
            .collect();

        let labels: Vec<String> = counts.iter().map(|(j, _)| truncate_label(j)).collect();

        Plot::new("top_journals")
            .height(CHART_HEIGHT)
            .x_axis_label("Number of Papers")
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .y_axis_formatter(move |mark, _range| {
                index_label(&labels, mark.value, n)
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .horizontal()
                        .color(JOURNAL_COLOR)
                        .name("Journals"),
                );
            });
    }

    /// Vertical bar chart of paper counts per source feed.
    pub fn draw_source_chart(ui: &mut egui::Ui, counts: &[(String, usize)]) {
        let n = counts.len();
        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, (source, count))| {
                Bar::new(i as f64, *count as f64)
                    .width(0.6)
                    .name(source.clone())
            })
            .collect();

        let labels: Vec<String> = counts.iter().map(|(s, _)| truncate_label(s)).collect();

        Plot::new("source_distribution")
            .height(CHART_HEIGHT)
            .x_axis_label("Source")
            .y_axis_label("Number of Papers")
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let i = mark.value.round();
                if (mark.value - i).abs() < 1e-6 {
                    labels.get(i as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(SOURCE_COLOR)
                        .name("Sources"),
                );
            });
    }
}

/// Map a horizontal-bar axis position back to its (flipped) label.
fn index_label(labels: &[String], value: f64, n: usize) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    let slot = rounded as usize;
    if slot >= n {
        return String::new();
    }
    labels.get(n - 1 - slot).cloned().unwrap_or_default()
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() <= AXIS_LABEL_MAX_CHARS {
        label.to_string()
    } else {
        let head: String = label.chars().take(AXIS_LABEL_MAX_CHARS - 1).collect();
        format!("{head}…")
    }
}
