/// Re-export `Config` from `clickscope-core` for use within this crate.
///
/// Environment parsing lives in `clickscope-core` so integration tests can
/// build a `Config` without depending on the server binary.
pub use clickscope_core::config::Config;
