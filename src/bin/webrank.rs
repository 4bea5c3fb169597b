use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use webrank::cli::{self, Cli};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when both are given
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to size the worker pool")?;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    cli::run(&cli, &mut input, &mut output)
        .with_context(|| format!("could not rank {}", cli.links.display()))?;
    output.flush()?;

    Ok(())
}
