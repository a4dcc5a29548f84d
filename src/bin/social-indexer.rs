//! Social Indexer CLI Binary
//!
//! Command-line interface for the social graph indexer.

use clap::Parser;
use social_indexer::logging::init_logging;
use social_indexer::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Load configuration; nothing is logged before the subscriber exists
    let config = match CliContext::load_config(&cli.workspace, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let logging = cli.logging_overrides(&config.logging);
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    // Create CLI context
    let context = match CliContext::from_config(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing indexer: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
