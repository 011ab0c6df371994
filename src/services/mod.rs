//! Services composing store reads into view models.

pub mod analysis;

pub use analysis::AnalysisService;
