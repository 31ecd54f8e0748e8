//! Utility modules

pub mod fuzzy;

pub use fuzzy::{edit_distance, bounded_distance};
