//! DUCK CLI - normalize data-use documents and inspect rulebases.

use clap::Parser;
use duck_cli::{commands, config, Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> duck_cli::Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;
    let formatter = Formatter::new(cli.format);

    let output = match cli.command {
        Command::Normalize(args) => commands::execute_normalize(args, &config, &formatter)?,
        Command::Rulebases(args) => commands::execute_rulebases(args, &config, &formatter)?,
    };
    println!("{}", output);

    Ok(())
}
