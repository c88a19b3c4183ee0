//! Read and write Java-style `.properties` configuration files.
//!
//! [`ConfigStore`] holds the default configuration loaded from the
//! `autumn.properties` resource. The functions in this crate's root operate
//! on arbitrary files and streams in the same format.

use std::env;

use terrors::OneOf;

mod cli;
mod error;
mod file;
mod parser;
mod properties;
mod resource;
mod store;
mod writer;

pub use error::{DecodeError, FileNotFound, IoError, MissingKey, ResourceNotFound, Usage};
pub use file::{ReadError, StreamError, read_map, read_map_from, read_value, read_value_from, write_value};
pub use properties::Properties;
pub use resource::{RESOURCE_PATH_ENV, ResourceLoader};
pub use store::ConfigStore;

/// Name of the default configuration resource.
pub const RESOURCE_NAME: &str = "autumn.properties";

pub type Error = OneOf<(Usage, MissingKey, FileNotFound, IoError, DecodeError)>;

/// Entry point of the `autumn-props` command.
pub fn run() -> Result<(), Error> {
    let args: Vec<String> = env::args().skip(1).collect();
    cli::run_cli(&args)
}
