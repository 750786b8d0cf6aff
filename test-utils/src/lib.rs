//! The single source of truth for all test data paths.

pub mod asset;
pub mod bert;
