// docaudit/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing::Level;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    // 1. Setup Logging (Tracing)
    // stdout carries the summary line only, diagnostics go to stderr
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();

    let code = commands::audit::execute(&cli);
    std::process::exit(code);
}
