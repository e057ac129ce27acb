//! Data module - listing loading, filtering and derived fields

mod columns;
mod filter;
mod loader;
mod processor;

pub use columns::{float_column, float_values, has_column, text_column};
pub use filter::{
    FilterError, FilterOptions, FilterSelection, ListingFilter, TypeSelection, FUEL_COLUMN,
    TYPE_COLUMN,
};
pub use loader::{DataLoader, LoadError};
pub use processor::{DataProcessor, ProcessorError, BRAND_COLUMN, MODEL_COLUMN};
