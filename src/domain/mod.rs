//! Core domain types and logic.

pub mod alert;
pub mod annotated;
pub mod bar;
pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod indicator_helpers;
pub mod instrument;
pub mod recency;
pub mod scan;
