//! autoinvent - command-line access to declarative model schemas.
//!
//! Commands:
//! - `autoinvent resolve <path>`: print every model's resolved field orders
//! - `autoinvent table <path> --model M --field F`: print a relationship's table columns
//! - `autoinvent check <path>`: run every lookup and report all problems
//!
//! `<path>` is a schema YAML file or a directory with one model per file.

pub mod check;
pub mod cli;
pub mod error;
pub mod relation;
pub mod resolve;
pub mod table;

pub use cli::{Cli, Commands, OutputFormat};
pub use error::{CliError, Result};
