pub mod aggregate;
pub mod classifier;
pub mod config;
pub mod enrich;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod summary;
pub mod visit;
pub mod visitor;
