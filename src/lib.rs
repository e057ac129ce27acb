//! Used Vehicle Market Dashboard
//!
//! Loads a cleaned used-vehicle listings CSV and turns it into the inputs
//! of a fixed set of descriptive charts, filtered by vehicle type and fuel.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod pipeline;
pub mod stats;
