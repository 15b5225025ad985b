//! # ploidy
//!
//! Region-aware ploidy lookup for variant callers and genotypers. A [`PloidyTable`]
//! maps genomic regions to the number of chromosome copies expected for each sample
//! sex category, so that e.g. chrX outside the pseudo-autosomal regions is haploid
//! in males and diploid in females, while everything not listed gets a default ploidy.
//!
//! ```
//! use ploidy::PloidyTable;
//!
//! let table = PloidyTable::from_preset_str("chrX 1 1000 M 1\nchrX 1 1000 F 2", 2).unwrap();
//! let (result, ploidies) = table.sex_ploidies("chrX", 499);
//! assert!(result.overlap);
//! assert_eq!(vec![1, 2], ploidies);
//! ```
pub mod cli;
pub mod error;
pub mod index;
pub mod io;
pub mod locus;
pub mod ploidy;
pub mod presets;
pub mod record;
pub mod sex;
pub mod utils;

use log::trace;

pub use crate::{
    error::PloidyError,
    index::{Region, RegionIndex, SortedRegionIndex},
    ploidy::{PloidyQuery, PloidyTable, SexPloidy},
    sex::SexRegistry,
};
use crate::locus::Locus;

/// Resolve the ploidy of every locus in `loci`. Meant to be called on chunks of loci from
/// inside a rayon parallel iterator; the table is only read, so all threads share it.
pub fn annotate_loci(loci: &mut [Locus], table: &PloidyTable, tidx: usize) {
    trace!("Launching thread {tidx}");

    for locus in loci {
        locus.set_ploidy_from_table(table);
    }

    trace!("Finished on thread {tidx}");
}
