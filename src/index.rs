//! # Genomic region index
//!
//! The ploidy table only needs two things from an interval index: building it once
//! from a stream of regions with attached payloads, and listing the payloads of all
//! regions that overlap a single position. [`RegionIndex`] captures exactly that, and
//! [`SortedRegionIndex`] is the implementation used by default.
use std::collections::HashMap;

/// A region on a named sequence. Coordinates are 0-based and inclusive on both ends,
/// so a single base at position `p` is `beg == end == p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub seqname: String,
    pub beg: u64,
    pub end: u64,
}

impl Region {
    pub fn new(seqname: &str, beg: u64, end: u64) -> Self {
        Self {
            seqname: seqname.to_owned(),
            beg,
            end,
        }
    }
}

pub trait RegionIndex<T> {
    /// Build the index from `(region, payload)` pairs.
    fn build<I>(regions: I) -> Self
    where
        I: IntoIterator<Item = (Region, T)>,
        Self: Sized;

    /// Payloads of all regions on `seqname` that contain `pos`. No particular order is
    /// promised by the trait; implementations document their own.
    fn overlapping<'a>(&'a self, seqname: &str, pos: u64) -> impl Iterator<Item = &'a T> + 'a
    where
        T: 'a;

    /// Number of stored regions
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
struct Entry<T> {
    beg: u64,
    end: u64,
    payload: T,
}

#[derive(Debug)]
struct Contig<T> {
    // sorted by `beg`, equal starts keep insertion order
    entries: Vec<Entry<T>>,
    // max_end[i] is the largest `end` among entries[..=i]
    max_end: Vec<u64>,
}

impl<T> Contig<T> {
    fn new(mut entries: Vec<Entry<T>>) -> Self {
        entries.sort_by_key(|e| e.beg);
        let max_end = entries
            .iter()
            .scan(0, |running, e| {
                *running = (*running).max(e.end);
                Some(*running)
            })
            .collect();
        Self { entries, max_end }
    }

    fn candidates(&self, pos: u64) -> &[Entry<T>] {
        // everything at or past `hi` starts after pos, everything before `lo` ends before it
        let hi = self.entries.partition_point(|e| e.beg <= pos);
        let lo = self.max_end[..hi].partition_point(|&end| end < pos);
        &self.entries[lo..hi]
    }
}

/// Per-sequence arrays of regions sorted by start coordinate, each paired with a running
/// maximum of end coordinates so that a point lookup is two binary searches plus a scan
/// of the remaining candidates.
///
/// Overlapping payloads are yielded in ascending order of region start; regions with equal
/// starts are yielded in the order they were inserted.
#[derive(Debug)]
pub struct SortedRegionIndex<T> {
    contigs: HashMap<String, Contig<T>>,
    seq_names: Vec<String>,
    n_regions: usize,
}

impl<T> SortedRegionIndex<T> {
    /// Sequence names in order of first appearance in the input
    pub fn seq_names(&self) -> impl Iterator<Item = &str> {
        self.seq_names.iter().map(String::as_str)
    }

    /// Number of regions stored for `seqname`
    pub fn n_regions_on(&self, seqname: &str) -> usize {
        self.contigs
            .get(seqname)
            .map_or(0, |contig| contig.entries.len())
    }
}

impl<T> RegionIndex<T> for SortedRegionIndex<T> {
    fn build<I>(regions: I) -> Self
    where
        I: IntoIterator<Item = (Region, T)>,
    {
        let mut grouped: HashMap<String, Vec<Entry<T>>> = HashMap::new();
        let mut seq_names = Vec::new();
        let mut n_regions = 0;

        for (region, payload) in regions {
            let entry = Entry {
                beg: region.beg,
                end: region.end,
                payload,
            };
            n_regions += 1;
            if let Some(entries) = grouped.get_mut(&region.seqname) {
                entries.push(entry);
            } else {
                seq_names.push(region.seqname.clone());
                grouped.insert(region.seqname, vec![entry]);
            }
        }

        let contigs = grouped
            .into_iter()
            .map(|(name, entries)| (name, Contig::new(entries)))
            .collect();

        Self {
            contigs,
            seq_names,
            n_regions,
        }
    }

    fn overlapping<'a>(&'a self, seqname: &str, pos: u64) -> impl Iterator<Item = &'a T> + 'a
    where
        T: 'a,
    {
        let candidates: &[Entry<T>] = match self.contigs.get(seqname) {
            Some(contig) => contig.candidates(pos),
            None => &[],
        };
        candidates
            .iter()
            .filter(move |e| e.end >= pos)
            .map(|e| &e.payload)
    }

    fn len(&self) -> usize {
        self.n_regions
    }
}
