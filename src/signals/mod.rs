//! Signal-set view functions: sentiment, palettes, chart selection and series.

pub mod aggregation;
pub mod categories;
pub mod charts;
pub mod selector;

pub use aggregation::*;
pub use categories::*;
pub use charts::*;
pub use selector::*;
