//! # Ploidy table records
//!
//! A ploidy table is plain text with one region per line:
//!
//! ```text
//! <chrom> <start> <end> <sex> <ploidy> [ignored ...]
//! ```
//!
//! Columns are separated by any whitespace. `start` and `end` are 1-based and inclusive,
//! like the region files used throughout htslib-based tools. Blank lines and lines
//! starting with `#` carry no record.
use log::trace;

use crate::{
    error::{PloidyError, Result},
    index::Region,
    utils::{next_token, parse_decimal_prefix, parse_int_prefix},
};

/// One parsed line of a ploidy table. The sex name borrows from the input line until the
/// table interns it.
#[derive(Debug, PartialEq, Eq)]
pub struct PloidyRecord<'a> {
    pub region: Region,
    pub sex: &'a str,
    pub ploidy: u32,
}

/// Parse the chromosome, start and end columns of `line` into a 0-based inclusive
/// [`Region`]. Returns `Ok(None)` for lines that carry no region (blank or `#` comment).
///
/// A line with only a chromosome name covers the whole chromosome. A start of `0` is
/// clamped to the first base. An end column that is missing or not a plain number
/// yields a single-base region at `start`.
pub fn parse_region(line: &str) -> Result<Option<Region>> {
    let Some((seqname, rest)) = next_token(line) else {
        trace!("Skipping blank line");
        return Ok(None);
    };
    if seqname.starts_with('#') {
        trace!("Skipping comment: {line}");
        return Ok(None);
    }

    let Some((start, rest)) = next_token(rest) else {
        return Ok(Some(Region::new(seqname, 0, u64::MAX)));
    };
    let (start, _) = parse_decimal_prefix(start)
        .ok_or_else(|| PloidyError::coordinates(line, "start is not a number"))?;
    let beg = start.saturating_sub(1);

    let end = match next_token(rest).map(|(end, _)| end.parse::<u64>()) {
        None | Some(Err(_)) => beg,
        Some(Ok(0)) => {
            return Err(PloidyError::coordinates(
                line,
                "expected 1-based end coordinate",
            ))
        }
        Some(Ok(end)) => end - 1,
    };
    if end < beg {
        return Err(PloidyError::coordinates(line, "end lies before start"));
    }

    Ok(Some(Region::new(seqname, beg, end)))
}

/// Parse a full ploidy table line.
///
/// Coordinate problems are returned as [`PloidyError::Coordinates`]. Once the coordinates
/// are accepted, a missing sex column or a missing, non-numeric or negative ploidy column
/// is a [`PloidyError::MalformedRecord`] naming the line.
pub fn parse_record(line: &str) -> Result<Option<PloidyRecord<'_>>> {
    let Some(region) = parse_region(line)? else {
        return Ok(None);
    };

    // skip the three coordinate columns
    let mut rest = line;
    for _ in 0..3 {
        let (_, tail) = next_token(rest).ok_or_else(|| PloidyError::malformed(line))?;
        rest = tail;
    }

    let (sex, rest) = next_token(rest).ok_or_else(|| PloidyError::malformed(line))?;
    let ploidy = parse_int_prefix(rest)
        .and_then(|ploidy| u32::try_from(ploidy).ok())
        .ok_or_else(|| PloidyError::malformed(line))?;

    Ok(Some(PloidyRecord {
        region,
        sex,
        ploidy,
    }))
}
