//! hostnet CLI entry point.
//!
//! Usage:
//!   hostnet                     # Interactive REPL
//!   hostnet --config <file>     # REPL with an explicit network.toml

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use hostnet_kernel::NetworkConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        None => {
            hostnet_repl::run(NetworkConfig::load()?)?;
            Ok(ExitCode::SUCCESS)
        }

        Some("--help" | "-h") => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }

        Some("--version" | "-V") => {
            println!("hostnet {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }

        Some("--config") => {
            let path = args.get(2).context("--config requires a file argument")?;
            let config = NetworkConfig::load_from(&PathBuf::from(path))?;
            hostnet_repl::run(config)?;
            Ok(ExitCode::SUCCESS)
        }

        Some(unknown) => {
            eprintln!("Unknown option: {unknown}");
            eprintln!("Run 'hostnet --help' for usage.");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_help() {
    println!(
        r#"hostnet v{}

Usage:
  hostnet                      Interactive REPL
  hostnet --config <file>      Use a specific network.toml

Options:
  -h, --help                   Show this help
  -V, --version                Show version

Set RUST_LOG=hostnet_kernel=debug to trace filesystem changes.
"#,
        env!("CARGO_PKG_VERSION")
    );
}
