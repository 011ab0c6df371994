//! Read/query layer over the pipeline's document store

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use store::AnalysisStore;
