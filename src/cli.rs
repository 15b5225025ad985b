//! # Command line interface for `ploidy`
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::error;

use crate::{io::OutputFormat, ploidy::PloidyTable};

#[derive(Parser)]
#[command(
    name = "ploidy",
    author,
    version,
    about = "Region and sex aware ploidy lookup",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the ploidy of each locus in a loci file
    Query {
        #[command(flatten)]
        table: TableArgs,

        /// Loci to annotate. Expected format is tab-separated CHROM and 1-based POS
        #[arg(short, long)]
        loci: String,

        /// Sex category to report, in output column order. Categories not mentioned in the table get the default ploidy everywhere
        #[arg(short = 's', long = "sex")]
        sexes: Vec<String>,

        /// Number of threads to use
        #[arg(long, default_value_t = 1, value_parser = threads_in_range)]
        threads: usize,

        /// Write JSON lines instead of a tab-separated table
        #[arg(long)]
        json: bool,
    },
    /// Summarize a ploidy table: sex categories, ploidy range and regions per sequence
    Inspect {
        #[command(flatten)]
        table: TableArgs,
    },
    /// List the built-in ploidy tables
    Presets,
}

#[derive(Args)]
pub struct TableArgs {
    /// File with ploidy regions. Expected format is whitespace-separated CHROM START END SEX PLOIDY, 1-based inclusive
    #[arg(short, long, required_unless_present = "preset", conflicts_with = "preset")]
    pub ploidy: Option<String>,

    /// Name of a built-in ploidy table (see `ploidy presets`)
    #[arg(long)]
    pub preset: Option<String>,

    /// Ploidy of positions that no region covers
    #[arg(short, long, default_value_t = 2)]
    pub default_ploidy: u32,
}

impl TableArgs {
    pub fn load(&self) -> Result<PloidyTable> {
        let loaded = match (&self.ploidy, &self.preset) {
            (Some(path), _) => PloidyTable::from_path(path, self.default_ploidy),
            (None, Some(name)) => PloidyTable::from_preset(name, self.default_ploidy),
            (None, None) => bail!("Either --ploidy or --preset must be given"),
        };

        loaded
            .map_err(|e| {
                if e.is_fatal() {
                    error!("The ploidy table is misconfigured, no partial table is used");
                }
                e
            })
            .context("Failed to load ploidy table")
    }
}

impl Commands {
    pub fn output_format(&self) -> OutputFormat {
        match self {
            Commands::Query { json: true, .. } => OutputFormat::Json,
            _ => OutputFormat::Tsv,
        }
    }
}

fn threads_in_range(s: &str) -> Result<usize> {
    let threads = s
        .parse()
        .context("Could not parse value passed to --threads to integer")?;
    if threads < 1 {
        bail!("--threads must be at least 1");
    }
    Ok(threads)
}
