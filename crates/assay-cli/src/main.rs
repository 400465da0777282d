//! Assay CLI - profile tabular data and extract grounded facts.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("Warning: {}", e);
    }

    let result = match cli.command {
        Commands::Analyze {
            file,
            schema,
            config,
            output,
        } => commands::analyze::run(file, schema, config, output),

        Commands::Facts { file, config } => commands::facts::run(file, config),

        Commands::Summary { file, config } => commands::summary::run(file, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
