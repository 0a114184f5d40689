//! Application module
//!
//! This module contains configuration, CLI parsing and the persistent
//! table option store for kapoview.

mod config;
mod config_file;
mod store;

pub use config::{exit_code, print_help, Command, Config};
pub use config_file::{ConfigFile, LoggingConfig, SelectionConfig, StorageConfig};
pub use store::{load_options, parse_options, TableOptionStore};
