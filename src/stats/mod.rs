//! Stats module - per-chart summaries

mod calculator;

pub use calculator::{
    AggregationError, HistogramInput, NumericSummary, ScatterGroup, ScatterPoint, ScatterSeries,
    SummaryCalculator, SummaryRow, SummaryTable, CONDITION_COLUMN, MISSING_CONDITION,
    MODEL_YEAR_COLUMN, ODOMETER_COLUMN, PRICE_COLUMN, TOP_BRANDS,
};
