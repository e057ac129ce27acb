//! Data Processor Module
//! Derived columns computed from the listing table.

use super::columns::{has_column, text_column};
use polars::prelude::*;
use thiserror::Error;

pub const MODEL_COLUMN: &str = "model";
pub const BRAND_COLUMN: &str = "brand";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' is required to derive '{1}' but missing from the table")]
    MissingField(String, String),
}

/// Handles derived-field transformations.
pub struct DataProcessor;

impl DataProcessor {
    /// Brand of a free-text model: first whitespace token, lower-cased.
    pub fn brand_of(model: &str) -> Option<String> {
        model.split_whitespace().next().map(str::to_lowercase)
    }

    /// Return a copy of the table with a `brand` column derived from `model`.
    ///
    /// Null or blank models give a null brand. An existing `brand` column is
    /// replaced, so deriving twice gives the same result as deriving once.
    pub fn derive_brand(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        if !has_column(df, MODEL_COLUMN) {
            return Err(ProcessorError::MissingField(
                MODEL_COLUMN.to_string(),
                BRAND_COLUMN.to_string(),
            ));
        }

        let models = text_column(df, MODEL_COLUMN)?;
        let brands: Vec<Option<String>> = models
            .into_iter()
            .map(|model| model.and_then(Self::brand_of))
            .collect();

        let mut result = df.clone();
        result.with_column(Column::new(BRAND_COLUMN.into(), brands))?;
        Ok(result)
    }
}
