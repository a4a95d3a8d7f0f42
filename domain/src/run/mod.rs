//! Run configuration

mod run_config;

pub use run_config::RunConfig;
