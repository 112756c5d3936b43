//! Command implementations for relay-cli

pub mod check;
pub mod config;
pub mod init;
pub mod manifest;
pub mod sync;

pub use check::run_check;
pub use config::run_config_list;
pub use init::run_init;
pub use manifest::run_manifest;
pub use sync::run_sync;
