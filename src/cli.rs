//! Command-line front end
//!
//! Settings resolve in three layers: built-in defaults, then an optional
//! TOML config file, then explicit flags.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use log::info;

use crate::config::{DanglingPolicy, RankConfig};
use crate::error::Result;
use crate::graph::builder::LinkMatrixBuilder;
use crate::input::prompt_page_count;
use crate::pagerank::power::PowerIteration;
use crate::pagerank::PageRankResult;
use crate::ranking::{RankReport, Standings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DanglingArg {
    Leak,
    Redistribute,
}

impl From<DanglingArg> for DanglingPolicy {
    fn from(arg: DanglingArg) -> Self {
        match arg {
            DanglingArg::Leak => DanglingPolicy::Leak,
            DanglingArg::Redistribute => DanglingPolicy::Redistribute,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "webrank", version, about = "Rank the pages of a small web with PageRank")]
pub struct Cli {
    /// Link list: per page, a link count followed by 1-based linked pages
    #[arg(default_value = "input.txt")]
    pub links: PathBuf,

    /// Number of pages (asked interactively when omitted)
    #[arg(long, short = 'n')]
    pub pages: Option<usize>,

    /// TOML file with ranking settings
    #[arg(long, short, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Teleportation weight, strictly between 0 and 1
    #[arg(long)]
    pub damping: Option<f32>,

    /// Convergence threshold on the change between iterations
    #[arg(long)]
    pub tolerance: Option<f32>,

    /// Give up after this many iterations
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// How to treat pages without outbound links
    #[arg(long, value_enum)]
    pub dangling: Option<DanglingArg>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only report the first K pages
    #[arg(long, value_name = "K")]
    pub top: Option<usize>,

    /// Worker threads for the matrix arithmetic
    #[arg(long)]
    pub threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Defaults, overlaid by the config file, overlaid by flags
    pub fn load_config(&self) -> Result<RankConfig> {
        let mut config = match &self.config {
            Some(path) => RankConfig::from_toml_file(path)?,
            None => RankConfig::default(),
        };

        if let Some(d) = self.damping {
            config.damping = d;
        }
        if let Some(eps) = self.tolerance {
            config.tolerance = eps;
        }
        if let Some(max) = self.max_iterations {
            config.max_iterations = Some(max);
        }
        if let Some(policy) = self.dangling {
            config.dangling = policy.into();
        }

        config.validate(self.pages)?;
        Ok(config)
    }

    /// Log filter implied by `-v` flags
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

/// Read the web, rank it and print the standings
///
/// Prompts go to `output` for text output and to stderr for JSON, so the
/// JSON document stays clean.
pub fn run<R, W>(cli: &Cli, input: &mut R, output: &mut W) -> Result<PageRankResult>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let config = cli.load_config()?;
    let text = cli.format == OutputFormat::Text;

    if text {
        writeln!(output, "Let's start by creating a model of the web.")?;
    }
    let pages = match cli.pages {
        Some(n) => n,
        None if text => prompt_page_count(input, output, &config)?,
        None => prompt_page_count(input, &mut std::io::stderr(), &config)?,
    };

    let matrix = LinkMatrixBuilder::new(pages)
        .with_dangling(config.dangling)
        .from_path(&cli.links)?;
    info!("loaded {pages} pages from {}", cli.links.display());

    let start = Instant::now();
    let result = PowerIteration::new(matrix, &config)?.run()?;
    let elapsed = start.elapsed().as_secs_f64();

    let mut standings = Standings::from_scores(&result.scores);
    if let Some(k) = cli.top {
        standings.truncate(k);
    }

    match cli.format {
        OutputFormat::Text => {
            writeln!(output, "Here are the standings:")?;
            standings.write_text(output)?;
            writeln!(output, "Execution time: {elapsed:.6} seconds")?;
        }
        OutputFormat::Json => {
            let report = RankReport::new(&result, standings, elapsed);
            serde_json::to_writer_pretty(&mut *output, &report)?;
            writeln!(output)?;
        }
    }

    Ok(result)
}
