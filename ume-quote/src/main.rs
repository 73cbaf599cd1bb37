use anyhow::Context;
use clap::Parser;
use ume_quote::{Cli, run, setup_environment};

fn main() -> anyhow::Result<()> {
    let config = setup_environment();
    let cli = Cli::parse();

    tracing::debug!(?config, "Configuration loaded");

    let output = run(&cli, &config).context("failed to compute quote")?;
    println!("{}", output);
    Ok(())
}
