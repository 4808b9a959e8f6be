// src/text/mod.rs
//! Text preparation: cleanup before detection and word tokenization.

pub mod normalize;
pub mod tokenize;

pub use normalize::clean_text;
pub use tokenize::tokenize_lower;
