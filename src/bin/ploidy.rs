use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use log::info;
use ploidy::{
    cli::{Cli, Commands},
    io::{self as ploidy_io, tsv},
    presets, RegionIndex,
};
use rayon::{prelude::*, ThreadPoolBuilder};

fn main() -> Result<()> {
    // Initialize the logger. If the log level is not set via `RUST_LOG`, set it to 'info' by default
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Cli::parse();
    let format = config.command.output_format();

    match config.command {
        Commands::Query {
            table,
            loci,
            sexes,
            threads,
            ..
        } => {
            let mut table = table.load()?;
            for sex in &sexes {
                let id = table.add_sex(sex);
                info!("Reporting sex category {sex} with id {id}");
            }

            let mut loci = tsv::read_loci(&loci)?;

            ThreadPoolBuilder::new().num_threads(threads).build_global()?;
            let chunksize = loci.len() / threads + 1;

            info!("Resolving ploidy for {} loci", loci.len());
            loci.par_chunks_mut(chunksize).for_each(|loci| {
                let tidx = rayon::current_thread_index().unwrap_or(0);
                ploidy::annotate_loci(loci, &table, tidx);
            });

            let stdout = io::stdout().lock();
            ploidy_io::write_loci(&loci, table.sexes(), format, io::BufWriter::new(stdout))?;
        }
        Commands::Inspect { table } => {
            let table = table.load()?;
            let mut out = io::stdout().lock();

            writeln!(out, "#sex\tid")?;
            for (id, sex) in table.sexes().names().enumerate() {
                writeln!(out, "{sex}\t{id}")?;
            }
            writeln!(
                out,
                "#default\t{}\n#min\t{}\n#max\t{}",
                table.default_ploidy(),
                table.min_ploidy(),
                table.max_ploidy()
            )?;
            writeln!(out, "#chrom\tregions")?;
            for seqname in table.regions().seq_names() {
                writeln!(out, "{seqname}\t{}", table.regions().n_regions_on(seqname))?;
            }
            info!("{} regions in total", table.regions().len());
        }
        Commands::Presets => {
            let mut out = io::stdout().lock();
            for preset in presets::PRESETS {
                writeln!(out, "{}\t{}", preset.name, preset.about)?;
            }
        }
    }

    Ok(())
}
