//! MediaFind Library
//!
//! Typo-tolerant search over a small media catalog: text normalization,
//! word-level edit distance and threshold matching.

pub mod config;
pub mod core;
pub mod error;
pub mod library;
pub mod matcher;
pub mod shell;
pub mod utils;
