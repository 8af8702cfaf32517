//! Shared helpers

pub mod glob;

pub use glob::ExcludeSet;
