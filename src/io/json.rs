use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{locus::Locus, sex::SexRegistry};

#[derive(Serialize)]
struct SexPloidyJson<'a> {
    sex: &'a str,
    ploidy: u32,
}

#[derive(Serialize)]
struct LocusJson<'a> {
    chrom: &'a str,
    pos: u64,
    overlap: bool,
    min: u32,
    max: u32,
    ploidy: Vec<SexPloidyJson<'a>>,
}

/// Write annotated loci as JSON lines, one object per locus, e.g.:
///
/// ```text
/// {"chrom":"chrX","pos":5000,"overlap":true,"min":1,"max":1,"ploidy":[{"sex":"M","ploidy":1},{"sex":"F","ploidy":2}]}
/// ```
pub fn write_loci<W: Write>(loci: &[Locus], sexes: &SexRegistry, mut writer: W) -> Result<()> {
    for locus in loci {
        let ploidy = locus
            .ploidy
            .as_ref()
            .with_context(|| format!("Locus {} was not annotated", locus.get_fetch_definition_s()))?;
        let record = LocusJson {
            chrom: &locus.seqname,
            pos: locus.pos,
            overlap: ploidy.overlap,
            min: ploidy.min,
            max: ploidy.max,
            ploidy: sexes
                .names()
                .zip(&ploidy.sex_ploidies)
                .map(|(sex, &value)| SexPloidyJson { sex, ploidy: value })
                .collect(),
        };
        serde_json::to_writer(&mut writer, &record).context("Could not serialize locus")?;
        writeln!(writer)?;
    }
    writer.flush()?;

    Ok(())
}
