// src/bin/cli.rs
use clap::Parser;
use wiki_scrape::{cli::{self, Cli}, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let log_file = args.log_file.as_deref().map(log::resolve_log_path);
    log::init(args.verbose, log_file.as_deref())?;

    cli::run(args)?;
    Ok(())
}
