//! Chart Viewer Widget
//! Central scrollable panel with the dashboard sections in a fixed order.

use crate::charts::{histogram_bins, ChartPlotter, HistogramBin};
use crate::pipeline::DashboardView;
use crate::stats::{HistogramInput, NumericSummary, SummaryCalculator, SummaryTable};
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 20.0;
const EMPTY_NOTE: &str = "No listings match the current filters";

/// A view plus everything derived from it for drawing. Built once per
/// selection, read every frame.
struct PreparedView {
    view: DashboardView,
    price_bins: Vec<HistogramBin>,
    price_summary: Option<NumericSummary>,
    model_year_bins: Vec<HistogramBin>,
    days_listed_bins: Vec<HistogramBin>,
}

impl PreparedView {
    fn new(view: DashboardView) -> Self {
        let bins = |input: &HistogramInput| histogram_bins(&input.values, input.bins);
        Self {
            price_bins: bins(&view.price_distribution),
            price_summary: SummaryCalculator::describe(&view.price_distribution.values),
            model_year_bins: bins(&view.model_year_distribution),
            days_listed_bins: bins(&view.days_listed_distribution),
            view,
        }
    }
}

/// Scrollable chart display area.
#[derive(Default)]
pub struct ChartViewer {
    prepared: Option<PreparedView>,
    pub error: Option<String>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a fresh view and clear any previous error.
    pub fn set_view(&mut self, view: DashboardView) {
        self.prepared = Some(PreparedView::new(view));
        self.error = None;
    }

    /// Replace the charts with an error message.
    pub fn set_error(&mut self, error: String) {
        self.prepared = None;
        self.error = Some(error);
    }

    /// Draw the chart viewer
    pub fn show(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = &self.error {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new(format!("⚠ {}", error))
                        .size(18.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            });
            return;
        }

        let Some(prepared) = &self.prepared else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };
        let view = &prepared.view;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(
                    RichText::new("Used Vehicle Market Analysis")
                        .size(26.0)
                        .strong(),
                );
                ui.label(format!(
                    "{} listings match the current filters. \
                     Use the sidebar to narrow the analysis.",
                    view.row_count()
                ));
                ui.add_space(SECTION_SPACING);

                Self::section(
                    ui,
                    "Price Distribution",
                    "How listing prices are spread across the market.",
                );
                if let Some(summary) = &prepared.price_summary {
                    Self::price_headline(ui, summary);
                }
                Self::histogram(ui, "price_hist", &prepared.price_bins, "price");

                Self::section(
                    ui,
                    "Price vs Mileage",
                    "Price against odometer reading, coloured by condition.",
                );
                if view.price_vs_mileage.is_empty() {
                    Self::empty_note(ui);
                } else {
                    ChartPlotter::draw_scatter(ui, "price_vs_odometer", &view.price_vs_mileage);
                }

                Self::section(ui, "Vehicle Condition", "Number of listings per condition.");
                Self::bars(
                    ui,
                    "condition_bars",
                    &view.condition_counts,
                    "condition",
                    "count",
                    false,
                );

                Self::section(
                    ui,
                    &format!("Top {} Brands by Average Price", view.top_brands.len()),
                    "Brands ranked by mean listing price.",
                );
                Self::bars(
                    ui,
                    "brand_bars",
                    &view.top_brands,
                    "brand",
                    "average price",
                    true,
                );

                Self::section(ui, "Model Year", "Number of listings per model year.");
                Self::histogram(
                    ui,
                    "model_year_hist",
                    &prepared.model_year_bins,
                    "model_year",
                );

                Self::section(ui, "Transmission", "Number of listings per transmission.");
                Self::bars(
                    ui,
                    "transmission_bars",
                    &view.transmission_counts,
                    "transmission",
                    "count",
                    false,
                );

                Self::section(ui, "Days Listed", "How long listings stay on the portal.");
                Self::histogram(
                    ui,
                    "days_listed_hist",
                    &prepared.days_listed_bins,
                    "days_listed",
                );

                Self::section(
                    ui,
                    "Vehicle Type and Fuel",
                    "Listings per vehicle type and per fuel.",
                );
                ui.columns(2, |columns| {
                    columns[0].label(RichText::new("By vehicle type").strong());
                    Self::bars(
                        &mut columns[0],
                        "type_bars",
                        &view.type_counts,
                        "type",
                        "count",
                        false,
                    );
                    columns[1].label(RichText::new("By fuel").strong());
                    Self::bars(
                        &mut columns[1],
                        "fuel_bars",
                        &view.fuel_counts,
                        "fuel",
                        "count",
                        false,
                    );
                });

                ui.add_space(SECTION_SPACING);
                ui.separator();
            });
    }

    fn section(ui: &mut egui::Ui, title: &str, description: &str) {
        ui.add_space(SECTION_SPACING);
        ui.label(RichText::new(title).size(18.0).strong());
        ui.label(RichText::new(description).size(12.0).color(Color32::GRAY));
        ui.add_space(6.0);
    }

    fn empty_note(ui: &mut egui::Ui) {
        ui.label(RichText::new(EMPTY_NOTE).italics().color(Color32::GRAY));
    }

    fn price_headline(ui: &mut egui::Ui, summary: &NumericSummary) {
        ui.label(
            RichText::new(format!(
                "median {} · mean {} · range {} - {}",
                ChartPlotter::short_number(summary.median),
                ChartPlotter::short_number(summary.mean),
                ChartPlotter::short_number(summary.min),
                ChartPlotter::short_number(summary.max)
            ))
            .size(12.0),
        );
    }

    fn histogram(ui: &mut egui::Ui, id: &str, bins: &[HistogramBin], x_label: &str) {
        if bins.is_empty() {
            Self::empty_note(ui);
        } else {
            ChartPlotter::draw_histogram(ui, id, bins, x_label);
        }
    }

    fn bars(
        ui: &mut egui::Ui,
        id: &str,
        table: &SummaryTable,
        x_label: &str,
        y_label: &str,
        show_values: bool,
    ) {
        if table.is_empty() {
            Self::empty_note(ui);
        } else {
            ChartPlotter::draw_bar_chart(ui, id, table, x_label, y_label, show_values);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FilterSelection, TypeSelection};
    use crate::pipeline::{ChartSettings, DashboardPipeline};
    use polars::prelude::*;
    use std::collections::BTreeSet;

    fn listings() -> DataFrame {
        df!(
            "price" => [9400.0, 25500.0, 5500.0, 1500.0],
            "model_year" => [Some(2011.0), None, Some(2013.0), Some(2003.0)],
            "model" => ["bmw x5", "ford f-150", "hyundai sonata", "ford f-150"],
            "condition" => ["good", "good", "like new", "fair"],
            "fuel" => ["gas", "gas", "gas", "diesel"],
            "odometer" => [145000.0, 88705.0, 110000.0, 181613.0],
            "transmission" => ["automatic", "automatic", "automatic", "manual"],
            "type" => ["SUV", "pickup", "sedan", "pickup"],
            "days_listed" => [19i64, 50, 79, 9]
        )
        .unwrap()
    }

    fn view_for(selection: &FilterSelection) -> DashboardView {
        let settings = ChartSettings {
            price_bins: 4,
            model_year_bins: 3,
            days_listed_bins: 5,
            ..ChartSettings::default()
        };
        DashboardPipeline::build_view(&listings(), selection, &settings).unwrap()
    }

    #[test]
    fn test_set_view_bins_once_per_view() {
        let view = view_for(&FilterSelection::default());
        let expected_price = histogram_bins(&view.price_distribution.values, 4);
        let expected_days = histogram_bins(&view.days_listed_distribution.values, 5);

        let mut viewer = ChartViewer::new();
        viewer.set_view(view);

        let prepared = viewer.prepared.as_ref().unwrap();
        assert_eq!(prepared.price_bins, expected_price);
        assert_eq!(prepared.price_bins.len(), 4);
        assert_eq!(prepared.model_year_bins.len(), 3);
        assert_eq!(prepared.days_listed_bins, expected_days);

        let summary = prepared.price_summary.unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.min, 1500.0);
        assert_eq!(summary.max, 25500.0);
        assert!(viewer.error.is_none());
    }

    #[test]
    fn test_empty_view_has_no_bins_or_summary() {
        let selection = FilterSelection {
            vehicle_type: TypeSelection::Only("SUV".to_string()),
            fuels: BTreeSet::from(["diesel".to_string()]),
        };
        let mut viewer = ChartViewer::new();
        viewer.set_view(view_for(&selection));

        let prepared = viewer.prepared.as_ref().unwrap();
        assert!(prepared.price_bins.is_empty());
        assert!(prepared.model_year_bins.is_empty());
        assert!(prepared.days_listed_bins.is_empty());
        assert!(prepared.price_summary.is_none());
    }

    #[test]
    fn test_error_replaces_prepared_view() {
        let mut viewer = ChartViewer::new();
        viewer.set_view(view_for(&FilterSelection::default()));
        viewer.set_error("Listings file not found: vehicles_clean.csv".to_string());

        assert!(viewer.prepared.is_none());
        assert_eq!(
            viewer.error.as_deref(),
            Some("Listings file not found: vehicles_clean.csv")
        );
    }
}
