//! Dashboard Pipeline
//! One render pass: filter the loaded table, derive brand, build every
//! chart input. Takes the table and selection as parameters and holds no
//! state between passes.

use crate::config::DashboardConfig;
use crate::data::{
    DataProcessor, FilterError, FilterSelection, ListingFilter, ProcessorError, FUEL_COLUMN,
    TYPE_COLUMN,
};
use crate::stats::{
    AggregationError, HistogramInput, ScatterSeries, SummaryCalculator, SummaryTable,
    CONDITION_COLUMN, MODEL_YEAR_COLUMN, PRICE_COLUMN,
};
use polars::prelude::*;
use std::sync::Arc;
use thiserror::Error;

pub const DAYS_LISTED_COLUMN: &str = "days_listed";
pub const TRANSMISSION_COLUMN: &str = "transmission";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

/// Chart sizing knobs for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSettings {
    pub price_bins: usize,
    pub model_year_bins: usize,
    pub days_listed_bins: usize,
    pub top_brands: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

impl From<&DashboardConfig> for ChartSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            price_bins: config.price_bins,
            model_year_bins: config.model_year_bins,
            days_listed_bins: config.days_listed_bins,
            top_brands: config.top_brands,
        }
    }
}

/// Everything the chart viewer draws for one filter selection.
///
/// The scatter series is shared so hover closures can hold it per frame
/// without copying the points.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub filtered: DataFrame,
    pub price_distribution: HistogramInput,
    pub price_vs_mileage: Arc<ScatterSeries>,
    pub condition_counts: SummaryTable,
    pub top_brands: SummaryTable,
    pub model_year_distribution: HistogramInput,
    pub transmission_counts: SummaryTable,
    pub days_listed_distribution: HistogramInput,
    pub type_counts: SummaryTable,
    pub fuel_counts: SummaryTable,
}

impl DashboardView {
    pub fn row_count(&self) -> usize {
        self.filtered.height()
    }
}

pub struct DashboardPipeline;

impl DashboardPipeline {
    /// Build the view for `selection` over the loaded `table`.
    /// The table itself is never modified.
    pub fn build_view(
        table: &DataFrame,
        selection: &FilterSelection,
        settings: &ChartSettings,
    ) -> Result<DashboardView, PipelineError> {
        let filtered = ListingFilter::apply(table, selection)?;
        log::debug!(
            "Filter {} / {} fuel(s): {} of {} listings",
            selection.vehicle_type,
            selection.fuels.len(),
            filtered.height(),
            table.height()
        );

        let with_brand = if filtered.height() == 0 {
            filtered.clone()
        } else {
            DataProcessor::derive_brand(&filtered)?
        };

        Ok(DashboardView {
            price_distribution: SummaryCalculator::histogram_input(
                &filtered,
                PRICE_COLUMN,
                settings.price_bins,
            )?,
            price_vs_mileage: Arc::new(SummaryCalculator::price_vs_mileage(&filtered)?),
            condition_counts: SummaryCalculator::count_by_category(&filtered, CONDITION_COLUMN)?,
            top_brands: SummaryCalculator::top_brands_by_average_price(
                &with_brand,
                settings.top_brands,
            )?,
            model_year_distribution: SummaryCalculator::histogram_input(
                &filtered,
                MODEL_YEAR_COLUMN,
                settings.model_year_bins,
            )?,
            transmission_counts: SummaryCalculator::count_by_category(
                &filtered,
                TRANSMISSION_COLUMN,
            )?,
            days_listed_distribution: SummaryCalculator::histogram_input(
                &filtered,
                DAYS_LISTED_COLUMN,
                settings.days_listed_bins,
            )?,
            type_counts: SummaryCalculator::count_by_category(&filtered, TYPE_COLUMN)?,
            fuel_counts: SummaryCalculator::count_by_category(&filtered, FUEL_COLUMN)?,
            filtered,
        })
    }
}
