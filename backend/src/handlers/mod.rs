//! HTTP handlers for the Mantri Priority Platform

pub mod health;
pub mod priority;

pub use health::*;
pub use priority::*;
