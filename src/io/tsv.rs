use std::{io::Write, path::Path};

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use log::info;

use crate::{locus::Locus, sex::SexRegistry};

/// Read loci from the tab-separated file at `path`. Each line holds a sequence name and a
/// 1-based position; further columns and lines starting with `#` are ignored.
pub fn read_loci<P: AsRef<Path>>(path: P) -> Result<Vec<Locus>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .comment(Some(b'#'))
        .from_path(path)
        .with_context(|| format!("Could not read loci file {}", path.display()))?;

    let mut loci = Vec::new();
    for result in reader.records() {
        let record =
            result.with_context(|| format!("Failed to read locus in {}", path.display()))?;
        let (Some(seqname), Some(pos)) = (record.get(0), record.get(1)) else {
            bail!(
                "Expected at least two columns in {}, found {:?}",
                path.display(),
                record
            );
        };
        let pos: u64 = pos
            .trim()
            .parse()
            .with_context(|| format!("Invalid position '{pos}' for {seqname} in {}", path.display()))?;
        if pos == 0 {
            bail!("Positions in {} must be 1-based, found 0 for {seqname}", path.display());
        }
        loci.push(Locus::new(seqname, pos));
    }

    info!("Read {} loci from {}", loci.len(), path.display());
    Ok(loci)
}

/// Write annotated loci as a tab-separated table with a header line and one ploidy
/// column per sex category.
pub fn write_loci<W: Write>(loci: &[Locus], sexes: &SexRegistry, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);

    let mut header = vec!["#chrom", "pos", "overlap", "min", "max"];
    header.extend(sexes.names());
    writer.write_record(&header)?;

    for locus in loci {
        let ploidy = locus
            .ploidy
            .as_ref()
            .with_context(|| format!("Locus {} was not annotated", locus.get_fetch_definition_s()))?;
        let mut row = vec![
            locus.seqname.clone(),
            locus.pos.to_string(),
            u8::from(ploidy.overlap).to_string(),
            ploidy.min.to_string(),
            ploidy.max.to_string(),
        ];
        row.extend(ploidy.sex_ploidies.iter().map(u32::to_string));
        writer.write_record(&row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ploidy::PloidyTable;

    #[test]
    fn write_header_and_rows() {
        let table = PloidyTable::from_preset_str("chrX 1 100 M 1\nchrX 1 100 F 2", 2).unwrap();
        let mut loci = vec![Locus::new("chrX", 50), Locus::new("chr1", 50)];
        for locus in &mut loci {
            locus.set_ploidy_from_table(&table);
        }

        let mut out = Vec::new();
        write_loci(&loci, table.sexes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            "#chrom\tpos\toverlap\tmin\tmax\tM\tF\nchrX\t50\t1\t1\t1\t1\t2\nchr1\t50\t0\t2\t2\t2\t2\n",
            out
        );
    }

    #[test]
    fn unannotated_locus_is_an_error() {
        let loci = vec![Locus::new("chrX", 50)];
        assert!(write_loci(&loci, &SexRegistry::new(), Vec::new()).is_err());
    }
}
