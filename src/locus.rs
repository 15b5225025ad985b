//! # Loci to annotate with ploidy
//!
//! A [`Locus`] is a single 1-based position on a named sequence, as read from a loci
//! file, together with the ploidy resolved for it from a [`PloidyTable`].
use log::trace;

use crate::ploidy::PloidyTable;

#[derive(Debug)]
pub struct Locus {
    pub seqname: String,
    // 1-based, like POS in VCF
    pub pos: u64,
    pub ploidy: Option<LocusPloidy>,
}

/// Ploidy resolved for a [`Locus`]. `sex_ploidies` is indexed by sex id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocusPloidy {
    pub overlap: bool,
    pub min: u32,
    pub max: u32,
    pub sex_ploidies: Vec<u32>,
}

impl Locus {
    pub fn new(seqname: &str, pos: u64) -> Self {
        Self {
            seqname: seqname.to_owned(),
            pos,
            ploidy: None,
        }
    }

    pub fn set_ploidy_from_table(&mut self, table: &PloidyTable) {
        let (result, sex_ploidies) = table.sex_ploidies(&self.seqname, self.pos.saturating_sub(1));
        if !result.overlap {
            trace!(
                "No ploidy region overlaps {}, using default",
                self.get_fetch_definition_s()
            );
        }
        self.ploidy = Some(LocusPloidy {
            overlap: result.overlap,
            min: result.min,
            max: result.max,
            sex_ploidies,
        });
    }

    pub fn get_fetch_definition_s(&self) -> String {
        format!("{}:{}", self.seqname, self.pos)
    }
}
