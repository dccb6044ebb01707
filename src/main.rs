use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = credvault::cli::Cli::parse();
    cli.run()
}
