//! Presentation facts derived from an indicator snapshot.
//!
//! Everything here is pure: no I/O, no clock reads, no shared state.

pub mod fibonacci;
pub mod macd;
pub mod moving_average;
pub mod oscillator;

pub use fibonacci::*;
pub use macd::*;
pub use moving_average::*;
pub use oscillator::*;
