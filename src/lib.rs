//! SignalScope: technical-analysis dashboard service.
//!
//! Reads analyses produced by an external pipeline, derives presentation
//! facts from indicator snapshots and classified signals, and serves them
//! as JSON view models.

pub mod cache;
pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod signals;
pub mod views;

pub use error::{DashboardError, Result};
