//! Listing Filter Module
//! Sidebar filters (vehicle type, fuel) applied to the listing table.

use super::columns::{distinct_text_values, has_column};
use polars::prelude::*;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

pub const TYPE_COLUMN: &str = "type";
pub const FUEL_COLUMN: &str = "fuel";

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' is required by the filter but missing from the table")]
    MissingField(String),
}

/// Vehicle type selection: every type, or exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeSelection {
    #[default]
    All,
    Only(String),
}

impl fmt::Display for TypeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSelection::All => write!(f, "All"),
            TypeSelection::Only(vehicle_type) => write!(f, "{vehicle_type}"),
        }
    }
}

/// Values offered in the sidebar, computed once from the loaded table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub types: Vec<String>,
    pub fuels: Vec<String>,
}

impl FilterOptions {
    /// Sorted distinct non-null values of `type` and `fuel`.
    ///
    /// An absent column offers no choices; the filters then behave as
    /// "show all" for it.
    pub fn from_table(df: &DataFrame) -> Result<Self, FilterError> {
        Ok(Self {
            types: Self::candidates(df, TYPE_COLUMN)?,
            fuels: Self::candidates(df, FUEL_COLUMN)?,
        })
    }

    fn candidates(df: &DataFrame, column: &str) -> Result<Vec<String>, FilterError> {
        if !has_column(df, column) {
            log::warn!("Column '{}' not found, no filter options offered", column);
            return Ok(Vec::new());
        }
        Ok(distinct_text_values(df, column)?.into_iter().collect())
    }
}

/// Current sidebar selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub vehicle_type: TypeSelection,
    /// Selected fuels. Empty means no fuel filter.
    pub fuels: BTreeSet<String>,
}

impl FilterSelection {
    /// Default selection: every type, every fuel.
    pub fn from_options(options: &FilterOptions) -> Self {
        Self {
            vehicle_type: TypeSelection::All,
            fuels: options.fuels.iter().cloned().collect(),
        }
    }
}

/// Row filters over the listing table. Every filter returns a new frame.
pub struct ListingFilter;

impl ListingFilter {
    /// Keep rows whose `type` equals the selected type exactly.
    pub fn filter_by_type(
        df: &DataFrame,
        selection: &TypeSelection,
    ) -> Result<DataFrame, FilterError> {
        let TypeSelection::Only(vehicle_type) = selection else {
            return Ok(df.clone());
        };
        if !has_column(df, TYPE_COLUMN) {
            return Err(FilterError::MissingField(TYPE_COLUMN.to_string()));
        }

        let filtered = df
            .clone()
            .lazy()
            .filter(
                col(TYPE_COLUMN)
                    .cast(DataType::String)
                    .eq(lit(vehicle_type.as_str())),
            )
            .collect()?;
        Ok(filtered)
    }

    /// Keep rows whose `fuel` is one of the selected fuels.
    /// An empty selection leaves the table unchanged.
    pub fn filter_by_fuel(
        df: &DataFrame,
        fuels: &BTreeSet<String>,
    ) -> Result<DataFrame, FilterError> {
        let Some(any_selected) = fuels
            .iter()
            .map(|fuel| col(FUEL_COLUMN).cast(DataType::String).eq(lit(fuel.as_str())))
            .reduce(|acc, matches| acc.or(matches))
        else {
            return Ok(df.clone());
        };
        if !has_column(df, FUEL_COLUMN) {
            return Err(FilterError::MissingField(FUEL_COLUMN.to_string()));
        }

        let filtered = df.clone().lazy().filter(any_selected).collect()?;
        Ok(filtered)
    }

    /// Type filter first, then fuel filter.
    pub fn apply(df: &DataFrame, selection: &FilterSelection) -> Result<DataFrame, FilterError> {
        let by_type = Self::filter_by_type(df, &selection.vehicle_type)?;
        Self::filter_by_fuel(&by_type, &selection.fuels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TYPES: [&str; 4] = ["suv", "sedan", "pickup", "SUV"];
    const FUELS: [&str; 3] = ["gas", "diesel", "hybrid"];

    fn listings() -> DataFrame {
        df!(
            "type" => [Some("suv"), Some("sedan"), Some("suv"), None, Some("SUV")],
            "fuel" => [Some("gas"), Some("diesel"), Some("gas"), Some("gas"), None],
            "model" => ["toyota corolla", "ford focus", "toyota camry", "ram 1500", "bmw x5"],
            "price" => [10000.0, 8000.0, 20000.0, 15000.0, 30000.0]
        )
        .unwrap()
    }

    fn table_from(rows: &[(usize, Option<usize>)]) -> DataFrame {
        let types: Vec<&str> = rows.iter().map(|(t, _)| TYPES[*t]).collect();
        let fuels: Vec<Option<&str>> = rows.iter().map(|(_, f)| f.map(|i| FUELS[i])).collect();
        let ids: Vec<i64> = (0..rows.len() as i64).collect();
        df!("type" => types, "fuel" => fuels, "id" => ids).unwrap()
    }

    fn fuel_set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_options_are_sorted_distinct_non_null() {
        let options = FilterOptions::from_table(&listings()).unwrap();

        assert_eq!(options.types, vec!["SUV", "sedan", "suv"]);
        assert_eq!(options.fuels, vec!["diesel", "gas"]);

        let selection = FilterSelection::from_options(&options);
        assert_eq!(selection.vehicle_type, TypeSelection::All);
        assert_eq!(selection.fuels, fuel_set(&["diesel", "gas"]));
    }

    #[test]
    fn test_options_for_missing_columns_are_empty() {
        let df = df!("price" => [1.0, 2.0]).unwrap();
        let options = FilterOptions::from_table(&df).unwrap();

        assert!(options.types.is_empty());
        assert!(options.fuels.is_empty());
    }

    #[test]
    fn test_type_filter_is_exact_and_case_sensitive() {
        let df = listings();
        let filtered =
            ListingFilter::filter_by_type(&df, &TypeSelection::Only("suv".to_string())).unwrap();

        assert_eq!(filtered.height(), 2);
        let models: Vec<Option<&str>> = filtered
            .column("model")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(models, vec![Some("toyota corolla"), Some("toyota camry")]);
    }

    #[test]
    fn test_type_filter_with_unknown_type_is_empty() {
        let filtered =
            ListingFilter::filter_by_type(&listings(), &TypeSelection::Only("van".to_string()))
                .unwrap();
        assert_eq!(filtered.height(), 0);
        assert_eq!(filtered.width(), 4);
    }

    #[test]
    fn test_fuel_filter_excludes_null_fuel() {
        let filtered = ListingFilter::filter_by_fuel(&listings(), &fuel_set(&["gas"])).unwrap();
        assert_eq!(filtered.height(), 3);
        assert_eq!(filtered.column("fuel").unwrap().null_count(), 0);
    }

    #[test]
    fn test_fuel_filter_keeps_row_order_and_columns() {
        let filtered =
            ListingFilter::filter_by_fuel(&listings(), &fuel_set(&["diesel", "gas"])).unwrap();

        assert_eq!(filtered.width(), 4);
        let models: Vec<Option<&str>> = filtered
            .column("model")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            models,
            vec![
                Some("toyota corolla"),
                Some("ford focus"),
                Some("toyota camry"),
                Some("ram 1500")
            ]
        );

        let none = ListingFilter::filter_by_fuel(&listings(), &fuel_set(&["electric"])).unwrap();
        assert_eq!(none.height(), 0);
        assert_eq!(none.width(), 4);
    }

    #[test]
    fn test_apply_narrows_type_then_fuel() {
        let selection = FilterSelection {
            vehicle_type: TypeSelection::Only("suv".to_string()),
            fuels: fuel_set(&["diesel"]),
        };
        let filtered = ListingFilter::apply(&listings(), &selection).unwrap();
        assert_eq!(filtered.height(), 0);

        let selection = FilterSelection {
            vehicle_type: TypeSelection::Only("sedan".to_string()),
            fuels: fuel_set(&["diesel", "gas"]),
        };
        let filtered = ListingFilter::apply(&listings(), &selection).unwrap();
        assert_eq!(filtered.height(), 1);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let df = df!("price" => [1.0, 2.0]).unwrap();

        let err = ListingFilter::filter_by_type(&df, &TypeSelection::Only("suv".to_string()))
            .unwrap_err();
        assert!(matches!(err, FilterError::MissingField(ref c) if c == "type"));

        let err = ListingFilter::filter_by_fuel(&df, &fuel_set(&["gas"])).unwrap_err();
        assert!(matches!(err, FilterError::MissingField(ref c) if c == "fuel"));

        // No-op filters never touch the columns
        assert!(ListingFilter::filter_by_type(&df, &TypeSelection::All).is_ok());
        assert!(ListingFilter::filter_by_fuel(&df, &BTreeSet::new()).is_ok());
    }

    fn rows_strategy() -> impl Strategy<Value = Vec<(usize, Option<usize>)>> {
        prop::collection::vec((0..TYPES.len(), prop::option::of(0..FUELS.len())), 0..40)
    }

    proptest! {
        #[test]
        fn prop_all_types_returns_same_table(rows in rows_strategy()) {
            let df = table_from(&rows);
            let filtered = ListingFilter::filter_by_type(&df, &TypeSelection::All).unwrap();
            prop_assert!(filtered.equals_missing(&df));
        }

        #[test]
        fn prop_type_filter_keeps_exactly_matching_rows(
            rows in rows_strategy(),
            pick in 0..TYPES.len()
        ) {
            let df = table_from(&rows);
            let wanted = TYPES[pick];
            let selection = TypeSelection::Only(wanted.to_string());
            let filtered = ListingFilter::filter_by_type(&df, &selection).unwrap();

            let expected = rows.iter().filter(|(t, _)| TYPES[*t] == wanted).count();
            prop_assert_eq!(filtered.height(), expected);
            let types = filtered.column("type").unwrap().str().unwrap().clone();
            prop_assert!(types.into_iter().all(|t| t == Some(wanted)));
        }

        #[test]
        fn prop_empty_fuel_selection_returns_same_table(rows in rows_strategy()) {
            let df = table_from(&rows);
            let filtered = ListingFilter::filter_by_fuel(&df, &BTreeSet::new()).unwrap();
            prop_assert!(filtered.equals_missing(&df));
        }

        #[test]
        fn prop_fuel_filter_keeps_only_selected_fuels(
            rows in rows_strategy(),
            picks in prop::sample::subsequence(FUELS.to_vec(), 1..=FUELS.len())
        ) {
            let df = table_from(&rows);
            let selected = fuel_set(&picks);
            let filtered = ListingFilter::filter_by_fuel(&df, &selected).unwrap();

            let expected = rows
                .iter()
                .filter(|(_, f)| f.is_some_and(|i| picks.contains(&FUELS[i])))
                .count();
            prop_assert_eq!(filtered.height(), expected);
            let fuels = filtered.column("fuel").unwrap().str().unwrap().clone();
            prop_assert!(fuels
                .into_iter()
                .all(|f| f.is_some_and(|f| selected.contains(f))));
        }
    }
}
