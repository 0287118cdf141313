//! autoinvent CLI entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error, or `check` found problems

use clap::Parser;
use tracing_subscriber::EnvFilter;

use autoinvent::{check, relation, resolve};
use autoinvent::{Cli, CliError, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("autoinvent=debug,autoinvent_schema=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = dispatch_command(cli.command).await;
    std::process::exit(exit_code);
}

async fn dispatch_command(cmd: Commands) -> i32 {
    match cmd {
        Commands::Resolve {
            path,
            model,
            format,
        } => result_to_exit(resolve::run_resolve(&path, model.as_deref(), format).await),
        Commands::Table { path, model, field } => {
            result_to_exit(relation::run_table(&path, &model, &field).await)
        }
        Commands::Check { path } => result_to_exit(check::run_check(&path).await),
    }
}

/// Convert a command result to an exit code.
fn result_to_exit(result: Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(CliError::ProblemsFound { count }) => {
            tracing::warn!(count, "check failed");
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
