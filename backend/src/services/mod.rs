//! Business logic services for the Mantri Priority Platform

pub mod priority;

pub use priority::PriorityService;
