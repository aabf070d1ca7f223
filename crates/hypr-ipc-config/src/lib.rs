//! Configuration parsing for hypr-ipc
//!
//! This crate handles parsing the KDL configuration file that tunes socket
//! discovery and event listener behaviour.

mod error;
mod model;
mod parser;

pub use error::ConfigError;
pub use model::*;
pub use parser::{parse_config, parse_config_str};
