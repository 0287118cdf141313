//! CLI definition for the autoinvent command-line interface.
//!
//! Only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Serialization format for resolved orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// autoinvent - declarative model schemas
///
/// Resolves field orders for index, create, detail and tooltip views and for
/// list and single-item queries.
#[derive(Parser, Debug)]
#[command(name = "autoinvent")]
#[command(version)]
#[command(about = "Resolve and check declarative model schemas")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every resolved field order and defaulted name
    Resolve {
        /// Schema YAML file or directory of per-model files
        path: PathBuf,
        /// Only this model
        #[arg(short, long)]
        model: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Print the columns of a relationship field's embedded table
    Table {
        /// Schema YAML file or directory of per-model files
        path: PathBuf,
        /// Model owning the relationship field
        #[arg(short, long)]
        model: String,
        /// Relationship field name
        #[arg(short, long)]
        field: String,
    },
    /// Run every lookup and report all problems
    Check {
        /// Schema YAML file or directory of per-model files
        path: PathBuf,
    },
}
