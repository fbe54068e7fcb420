//! Shared types and scoring logic for the Mantri Priority Platform
//!
//! This crate contains the pure domain core: the spreadsheet cell model,
//! sentinel-value validation, and the multi-factor outreach scoring
//! functions. It performs no I/O and holds no state.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
