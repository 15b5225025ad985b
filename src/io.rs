use std::io::Write;

use anyhow::Result;

use crate::{locus::Locus, sex::SexRegistry};

pub mod json;
pub mod tsv;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Json,
}

/// Write annotated `loci` to `writer` in the requested `format`. Per-sex ploidies are
/// labelled with the names registered in `sexes`.
pub fn write_loci<W: Write>(
    loci: &[Locus],
    sexes: &SexRegistry,
    format: OutputFormat,
    writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Tsv => tsv::write_loci(loci, sexes, writer),
        OutputFormat::Json => json::write_loci(loci, sexes, writer),
    }
}
