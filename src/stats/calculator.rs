//! Summary Calculator Module
//! Per-chart reductions over the filtered listing table: value counts,
//! mean price per brand, raw numeric columns and scatter series.

use crate::data::{
    float_column, float_values, has_column, text_column, BRAND_COLUMN, MODEL_COLUMN,
};
use polars::prelude::*;
use statrs::statistics::{Data, Median, Statistics};
use std::collections::BTreeMap;
use thiserror::Error;

pub const PRICE_COLUMN: &str = "price";
pub const ODOMETER_COLUMN: &str = "odometer";
pub const CONDITION_COLUMN: &str = "condition";
pub const MODEL_YEAR_COLUMN: &str = "model_year";

/// Number of brands kept by [`SummaryCalculator::average_price_by_brand`].
pub const TOP_BRANDS: usize = 20;

/// Scatter group for listings without a condition. Parenthesised so it
/// never collides with a real condition value.
pub const MISSING_CONDITION: &str = "(none)";

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' is required for this summary but missing from the table")]
    MissingField(String),
}

/// One bar of a summary chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: String,
    pub value: f64,
}

/// Two-column (category, value) table backing a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    pub label_column: String,
    pub value_column: String,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn new(label_column: &str, value_column: &str, rows: Vec<SummaryRow>) -> Self {
        Self {
            label_column: label_column.to_string(),
            value_column: value_column.to_string(),
            rows,
        }
    }

    pub fn empty(label_column: &str, value_column: &str) -> Self {
        Self::new(label_column, value_column, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    /// Value for a label, if present.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.rows.iter().find(|r| r.label == label).map(|r| r.value)
    }
}

/// Raw numeric column handed to a histogram. Binning is done at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramInput {
    pub field: String,
    pub values: Vec<f64>,
    pub bins: usize,
}

/// Descriptive numbers shown next to a histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub model_year: Option<f64>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub label: String,
    pub points: Vec<ScatterPoint>,
}

/// Points for an x/y scatter, one group per colour category.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub x_field: String,
    pub y_field: String,
    pub color_field: String,
    pub groups: Vec<ScatterGroup>,
}

impl ScatterSeries {
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

/// Stateless reductions; every call builds a fresh result.
///
/// An empty table always yields an empty result, even when the columns a
/// summary needs are absent.
pub struct SummaryCalculator;

impl SummaryCalculator {
    fn require(df: &DataFrame, field: &str) -> Result<(), AggregationError> {
        if has_column(df, field) {
            Ok(())
        } else {
            Err(AggregationError::MissingField(field.to_string()))
        }
    }

    /// Row count per distinct non-null value of `field`.
    ///
    /// Ordered by count descending, ties by label.
    pub fn count_by_category(
        df: &DataFrame,
        field: &str,
    ) -> Result<SummaryTable, AggregationError> {
        if df.height() == 0 {
            return Ok(SummaryTable::empty(field, "count"));
        }
        Self::require(df, field)?;

        let values = text_column(df, field)?;
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for value in values.into_iter().flatten() {
            *counts.entry(value).or_insert(0) += 1;
        }

        let mut rows: Vec<SummaryRow> = counts
            .into_iter()
            .map(|(label, count)| SummaryRow {
                label: label.to_string(),
                value: count as f64,
            })
            .collect();
        rows.sort_by(|a, b| b.value.total_cmp(&a.value));

        Ok(SummaryTable::new(field, "count", rows))
    }

    /// Mean price per brand, highest first, limited to [`TOP_BRANDS`].
    /// Requires the derived `brand` column.
    pub fn average_price_by_brand(df: &DataFrame) -> Result<SummaryTable, AggregationError> {
        Self::top_brands_by_average_price(df, TOP_BRANDS)
    }

    /// Mean price per brand, highest first, limited to `limit` brands.
    ///
    /// Null brands are excluded and null prices skipped. A brand with no
    /// price at all has no mean and is dropped. Ties keep brand order.
    pub fn top_brands_by_average_price(
        df: &DataFrame,
        limit: usize,
    ) -> Result<SummaryTable, AggregationError> {
        if df.height() == 0 {
            return Ok(SummaryTable::empty(BRAND_COLUMN, PRICE_COLUMN));
        }
        Self::require(df, BRAND_COLUMN)?;
        Self::require(df, PRICE_COLUMN)?;

        let brands = text_column(df, BRAND_COLUMN)?;
        let prices = float_column(df, PRICE_COLUMN)?;

        let mut by_brand: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for (brand, price) in brands.into_iter().zip(prices.into_iter()) {
            let Some(brand) = brand else {
                continue;
            };
            let brand_prices = by_brand.entry(brand).or_default();
            if let Some(price) = price.filter(|p| !p.is_nan()) {
                brand_prices.push(price);
            }
        }

        let mut rows: Vec<SummaryRow> = by_brand
            .into_iter()
            .filter(|(_, prices)| !prices.is_empty())
            .map(|(brand, prices)| SummaryRow {
                label: brand.to_string(),
                value: prices.iter().mean(),
            })
            .collect();
        rows.sort_by(|a, b| b.value.total_cmp(&a.value));
        rows.truncate(limit);

        Ok(SummaryTable::new(BRAND_COLUMN, PRICE_COLUMN, rows))
    }

    /// Non-null values of a numeric column together with the bin count
    /// the histogram should use.
    pub fn histogram_input(
        df: &DataFrame,
        field: &str,
        bins: usize,
    ) -> Result<HistogramInput, AggregationError> {
        let values = if df.height() == 0 {
            Vec::new()
        } else {
            Self::require(df, field)?;
            float_values(df, field)?
        };

        Ok(HistogramInput {
            field: field.to_string(),
            values,
            bins,
        })
    }

    /// Count, mean, median and range of a set of values.
    pub fn describe(values: &[f64]) -> Option<NumericSummary> {
        if values.is_empty() {
            return None;
        }

        let mean = values.iter().mean();
        let median = Data::new(values.to_vec()).median();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(NumericSummary {
            count: values.len(),
            mean,
            median,
            min,
            max,
        })
    }

    /// Price against odometer, grouped by condition. Rows missing either
    /// coordinate are skipped. Model year and model are carried for hover
    /// text when the table has them.
    pub fn price_vs_mileage(df: &DataFrame) -> Result<ScatterSeries, AggregationError> {
        let mut series = ScatterSeries {
            x_field: ODOMETER_COLUMN.to_string(),
            y_field: PRICE_COLUMN.to_string(),
            color_field: CONDITION_COLUMN.to_string(),
            groups: Vec::new(),
        };
        if df.height() == 0 {
            return Ok(series);
        }
        Self::require(df, ODOMETER_COLUMN)?;
        Self::require(df, PRICE_COLUMN)?;
        Self::require(df, CONDITION_COLUMN)?;

        let odometer = float_column(df, ODOMETER_COLUMN)?;
        let price = float_column(df, PRICE_COLUMN)?;
        let condition = text_column(df, CONDITION_COLUMN)?;

        let model_years: Vec<Option<f64>> = if has_column(df, MODEL_YEAR_COLUMN) {
            float_column(df, MODEL_YEAR_COLUMN)?.into_iter().collect()
        } else {
            vec![None; df.height()]
        };
        let models: Vec<Option<String>> = if has_column(df, MODEL_COLUMN) {
            text_column(df, MODEL_COLUMN)?
                .into_iter()
                .map(|m| m.map(str::to_string))
                .collect()
        } else {
            vec![None; df.height()]
        };

        let mut groups: BTreeMap<&str, Vec<ScatterPoint>> = BTreeMap::new();
        let rows = odometer
            .into_iter()
            .zip(price.into_iter())
            .zip(condition.into_iter())
            .zip(model_years.into_iter().zip(models));
        for (((x, y), condition), (model_year, model)) in rows {
            let (Some(x), Some(y)) = (x, y) else {
                continue;
            };
            if x.is_nan() || y.is_nan() {
                continue;
            }
            groups
                .entry(condition.unwrap_or(MISSING_CONDITION))
                .or_default()
                .push(ScatterPoint {
                    x,
                    y,
                    model_year,
                    model,
                });
        }

        series.groups = groups
            .into_iter()
            .map(|(label, points)| ScatterGroup {
                label: label.to_string(),
                points,
            })
            .collect();
        Ok(series)
    }
}
