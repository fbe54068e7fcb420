//! Domain models for the Mantri Priority Platform

pub mod pipeline;
pub mod scoring;
mod visit;

pub use pipeline::*;
pub use scoring::*;
pub use visit::*;
