pub mod app;
pub mod config;
pub mod error;
pub mod insight;
pub mod routes;
pub mod state;
