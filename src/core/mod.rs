//! HTTP surface of the dashboard

pub mod http;

pub use http::*;
