//! Handler module - CLI command and selection script handling

pub mod command;
pub mod script;

pub use command::execute;
pub use script::{parse_script, SelectScript};
