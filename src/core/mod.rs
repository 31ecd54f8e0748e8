//! Core processing modules
//!
//! Text normalization shared by catalog indexing and query handling.

pub mod text_normalizer;

pub use text_normalizer::{NormalizerConfig, TextNormalizer, TokenSequence};
