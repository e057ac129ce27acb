//! Charts module - Chart rendering

mod histogram;
mod plotter;

pub use histogram::{histogram_bins, HistogramBin};
pub use plotter::ChartPlotter;
