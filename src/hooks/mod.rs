//! Git hook implementations

pub mod commit_size;

pub use commit_size::{Verdict, check};
