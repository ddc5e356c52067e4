//! Mimizuku CLI main entry point

use anyhow::Result;
use clap::Parser;
use mimizuku_cli::commands::{Cli, CommandExecutor};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let executor = CommandExecutor::from_config_file(cli.config.as_deref())?;
    let result = executor.execute(cli.command)?;
    println!("{}", result.render(&cli.format)?);

    if result.success {
        std::process::exit(0);
    } else {
        std::process::exit(1);
    }
}
