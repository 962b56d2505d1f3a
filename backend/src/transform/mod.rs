//! Transformation module.
//!
//! - Cleaner: question text normalization
//! - Executor: raw rows to goal records
//! - Pipeline: parse, validate, transform, batch

pub mod cleaner;
pub mod executor;
pub mod pipeline;

pub use cleaner::clean_question_text;
pub use executor::{draw_id_base, transform, transform_with_base, ID_RANGE, OPTIONS_SEPARATOR};
pub use pipeline::*;
