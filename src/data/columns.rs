//! Column access helpers shared by the filter, processor and stats modules.

use polars::prelude::*;
use std::collections::BTreeSet;

/// Whether the frame carries a column with this name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Column values as text, whatever the inferred dtype was.
pub fn text_column(df: &DataFrame, name: &str) -> PolarsResult<StringChunked> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column.str()?.clone())
}

/// Column values as f64.
pub fn float_column(df: &DataFrame, name: &str) -> PolarsResult<Float64Chunked> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.clone())
}

/// Non-null f64 values of a column, in row order. NaN is treated as null.
pub fn float_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    Ok(float_column(df, name)?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

/// Sorted set of distinct non-null values of a column.
pub fn distinct_text_values(df: &DataFrame, name: &str) -> PolarsResult<BTreeSet<String>> {
    Ok(text_column(df, name)?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect())
}
