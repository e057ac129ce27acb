//! Listing Loader Module
//! Reads the vehicle listings CSV into a Polars DataFrame.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Listings file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Owns the listing table for the lifetime of the dashboard.
///
/// The table is loaded once and only ever read afterwards; filters
/// produce new frames.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoadError> {
        self.file_path = Some(file_path.to_path_buf());
        self.df = None;

        let df = Self::read_csv(file_path)?;
        log::info!(
            "Loaded {} listings with {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );

        Ok(self.df.insert(df))
    }

    /// Read a CSV file into a DataFrame without keeping it.
    pub fn read_csv(file_path: &Path) -> Result<DataFrame, LoadError> {
        if !file_path.is_file() {
            return Err(LoadError::NotFound(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Ok(df)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_keeps_row_order_and_numeric_types() {
        let file = write_csv(
            "price,model_year,model,condition,odometer,type,fuel,transmission,days_listed\n\
             9400,2011,bmw x5,good,145000,SUV,gas,automatic,19\n\
             25500,,ford f-150,good,88705,pickup,gas,automatic,50\n\
             5500,2013,hyundai sonata,like new,110000,sedan,gas,automatic,79\n",
        );

        let mut loader = DataLoader::new();
        let df = loader.load_csv(file.path()).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(df.column("price").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("model_year").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("model").unwrap().dtype(), &DataType::String);

        let models: Vec<Option<&str>> = df
            .column("model")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            models,
            vec![Some("bmw x5"), Some("ford f-150"), Some("hyundai sonata")]
        );
        assert_eq!(df.column("model_year").unwrap().null_count(), 1);
        assert_eq!(loader.get_row_count(), 3);
        assert_eq!(loader.get_columns().len(), 9);
    }

    #[test]
    fn test_load_returns_the_kept_table() {
        let file = write_csv("price,type\n100,suv\n200,sedan\n");

        let mut loader = DataLoader::new();
        let height = loader.load_csv(file.path()).unwrap().height();

        assert_eq!(height, 2);
        assert_eq!(loader.get_dataframe().map(|df| df.height()), Some(2));
        assert_eq!(loader.get_file_path(), Some(&file.path().to_path_buf()));
    }

    #[test]
    fn test_reload_failure_drops_previous_table() {
        let file = write_csv("price\n100\n");
        let mut loader = DataLoader::new();
        loader.load_csv(file.path()).unwrap();

        assert!(loader.load_csv(Path::new("/definitely/not/here.csv")).is_err());
        assert!(loader.get_dataframe().is_none());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let mut loader = DataLoader::new();
        let result = loader.load_csv(Path::new("/definitely/not/here/vehicles.csv"));

        assert!(matches!(result, Err(LoadError::NotFound(_))));
        assert!(loader.get_dataframe().is_none());
        assert_eq!(loader.get_row_count(), 0);
        assert!(loader.get_file_path().is_some());
    }
}
