//! View models assembled from fetched analysis records.

pub mod analysis;
pub mod dashboard;

pub use analysis::*;
pub use dashboard::*;
