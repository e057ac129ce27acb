//! Chart Plotter Module
//! Draws the dashboard charts using egui_plot.

use super::histogram::HistogramBin;
use crate::stats::{ScatterGroup, ScatterPoint, ScatterSeries, SummaryTable};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Points};
use std::sync::Arc;

/// Main series colour
pub const PRIMARY_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

const CHART_HEIGHT: f32 = 320.0;

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Colour for the n-th category of a chart.
    pub fn get_group_color(group_index: usize) -> Color32 {
        PALETTE[group_index % PALETTE.len()]
    }

    /// Compact number label: 950, 15k, 1.3M.
    pub fn short_number(value: f64) -> String {
        let abs = value.abs();
        let (scaled, suffix) = if abs >= 1e9 {
            (value / 1e9, "G")
        } else if abs >= 1e6 {
            (value / 1e6, "M")
        } else if abs >= 1e3 {
            (value / 1e3, "k")
        } else {
            (value, "")
        };

        let text = if scaled.abs() >= 10.0 || scaled.fract() == 0.0 {
            format!("{:.0}", scaled)
        } else {
            format!("{:.1}", scaled)
        };
        format!("{}{}", text, suffix)
    }

    /// Draw precomputed histogram bins.
    pub fn draw_histogram(ui: &mut egui::Ui, id: &str, bins: &[HistogramBin], x_label: &str) {
        let bars: Vec<Bar> = bins
            .iter()
            .map(|bin| {
                Bar::new(bin.center(), bin.count as f64)
                    .width(bin.width())
                    .name(format!(
                        "{} - {}",
                        Self::short_number(bin.start),
                        Self::short_number(bin.end)
                    ))
            })
            .collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label.to_string())
            .y_axis_label("count")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(PRIMARY_COLOR).name(x_label));
            });
    }

    /// Draw a (category, value) bar chart.
    /// X-axis: categories in table order, Y-axis: value
    pub fn draw_bar_chart(
        ui: &mut egui::Ui,
        id: &str,
        table: &SummaryTable,
        x_label: &str,
        y_label: &str,
        show_values: bool,
    ) {
        let x_labels: Vec<String> = table.rows.iter().map(|r| r.label.clone()).collect();

        let bars: Vec<Bar> = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let name = if show_values {
                    format!("{} ({})", row.label, Self::short_number(row.value))
                } else {
                    row.label.clone()
                };
                Bar::new(i as f64, row.value)
                    .width(0.7)
                    .name(name)
                    .fill(Self::get_group_color(i))
            })
            .collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .x_axis_label(x_label.to_string())
            .y_axis_label(y_label.to_string())
            .x_axis_formatter(move |mark, _range| {
                let v = mark.value;
                if v < 0.0 || v.fract() != 0.0 {
                    return String::new();
                }
                x_labels.get(v as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(y_label));
            });
    }

    /// Nearest point of a named group, for hover text.
    fn nearest_point<'a>(
        groups: &'a [ScatterGroup],
        name: &str,
        at: &PlotPoint,
    ) -> Option<&'a ScatterPoint> {
        groups
            .iter()
            .find(|g| g.label == name)?
            .points
            .iter()
            .min_by(|a, b| {
                let da = (a.x - at.x).powi(2) + (a.y - at.y).powi(2);
                let db = (b.x - at.x).powi(2) + (b.y - at.y).powi(2);
                da.total_cmp(&db)
            })
    }

    /// Draw an x/y scatter coloured by category, with model and model year
    /// in the hover label.
    pub fn draw_scatter(ui: &mut egui::Ui, id: &str, series: &Arc<ScatterSeries>) {
        let hover = Arc::clone(series);

        Plot::new(id.to_string())
            .height(CHART_HEIGHT + 80.0)
            .allow_scroll(false)
            .x_axis_label(series.x_field.clone())
            .y_axis_label(series.y_field.clone())
            .legend(Legend::default())
            .label_formatter(move |name, value| {
                let (x_field, y_field) = (&hover.x_field, &hover.y_field);
                let Some(point) = Self::nearest_point(&hover.groups, name, value) else {
                    return format!("{}: {:.0}\n{}: {:.0}", x_field, value.x, y_field, value.y);
                };
                let year = point
                    .model_year
                    .map(|y| format!("{:.0}", y))
                    .unwrap_or_else(|| "-".to_string());
                format!(
                    "{}\n{}: {:.0}\n{}: {:.0}\nmodel_year: {}\nmodel: {}",
                    name,
                    x_field,
                    point.x,
                    y_field,
                    point.y,
                    year,
                    point.model.as_deref().unwrap_or("-")
                )
            })
            .show(ui, |plot_ui| {
                for (i, group) in series.groups.iter().enumerate() {
                    let points: PlotPoints = group.points.iter().map(|p| [p.x, p.y]).collect();
                    plot_ui.points(
                        Points::new(points)
                            .radius(2.0)
                            .color(Self::get_group_color(i).gamma_multiply(0.7))
                            .name(&group.label),
                    );
                }
            });
    }
}
