//! # Region-annotated ploidy tables
//!
//! A [`PloidyTable`] answers the question "how many copies of this position should a
//! sample of a given sex carry?". It is built once from a table file or a preset string
//! (see [`crate::record`] for the line format) and is read-only afterwards, apart from
//! registering extra sex categories with [`PloidyTable::add_sex`].
//!
//! Positions not covered by any region get the default ploidy given at construction.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::info;

use crate::{
    error::{PloidyError, Result},
    index::{Region, RegionIndex, SortedRegionIndex},
    presets,
    record::parse_record,
    sex::SexRegistry,
};

/// Payload stored with every region of the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SexPloidy {
    pub sex: usize,
    pub ploidy: u32,
}

/// Outcome of a point query. `min` and `max` only consider regions whose ploidy differs
/// from the default; if there are none they both equal the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PloidyQuery {
    pub overlap: bool,
    pub min: u32,
    pub max: u32,
}

/// Genomic regions annotated with per-sex ploidy, queried by position.
#[derive(Debug)]
pub struct PloidyTable<I = SortedRegionIndex<SexPloidy>> {
    default: u32,
    // extremes over all parsed records, whether or not they equal the default
    min: u32,
    max: u32,
    sexes: SexRegistry,
    index: I,
}

/// Accumulates records line by line until the index can be built
struct TableLoader {
    default: u32,
    min: u32,
    max: u32,
    sexes: SexRegistry,
    records: Vec<(Region, SexPloidy)>,
}

impl TableLoader {
    fn new(default: u32) -> Self {
        Self {
            default,
            min: default,
            max: default,
            sexes: SexRegistry::new(),
            records: Vec::new(),
        }
    }

    fn insert_line(&mut self, line: &str) -> Result<()> {
        let Some(record) = parse_record(line)? else {
            return Ok(());
        };
        let sex = self.sexes.lookup_or_create(record.sex);
        self.min = self.min.min(record.ploidy);
        self.max = self.max.max(record.ploidy);
        self.records.push((
            record.region,
            SexPloidy {
                sex,
                ploidy: record.ploidy,
            },
        ));
        Ok(())
    }

    fn finish<I: RegionIndex<SexPloidy>>(self) -> PloidyTable<I> {
        PloidyTable {
            default: self.default,
            min: self.min,
            max: self.max,
            sexes: self.sexes,
            index: I::build(self.records),
        }
    }
}

impl PloidyTable {
    /// Load a ploidy table from the text file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P, default: u32) -> Result<Self> {
        let io_error = |source| PloidyError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        };
        let mut reader = BufReader::new(File::open(&path).map_err(io_error)?);

        // invalid UTF-8 is replaced, not rejected
        let mut loader = TableLoader::new(default);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).map_err(io_error)? == 0 {
                break;
            }
            let line = buf
                .strip_suffix(b"\n")
                .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
                .unwrap_or(&buf[..]);
            loader.insert_line(&String::from_utf8_lossy(line))?;
        }
        let table: Self = loader.finish();

        info!(
            "Read {} ploidy regions for {} sex categories from {}",
            table.index.len(),
            table.sex_count(),
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Load a ploidy table from an in-memory string with one record per line.
    /// Leading and trailing whitespace around each line is ignored.
    pub fn from_preset_str(text: &str, default: u32) -> Result<Self> {
        Self::from_lines(
            text.split(&['\r', '\n'][..])
                .map(str::trim)
                .filter(|line| !line.is_empty()),
            default,
        )
    }

    /// Load one of the built-in tables listed in [`presets::PRESETS`].
    pub fn from_preset(name: &str, default: u32) -> Result<Self> {
        let preset = presets::find(name).ok_or_else(|| PloidyError::UnknownPreset {
            name: name.to_owned(),
        })?;
        let table = Self::from_preset_str(preset.regions, default)?;
        info!("Using ploidy preset {} ({})", preset.name, preset.about);
        Ok(table)
    }
}

impl<I: RegionIndex<SexPloidy>> PloidyTable<I> {
    /// Build a table backed by any [`RegionIndex`] from an iterator of lines.
    pub fn from_lines<L, S>(lines: L, default: u32) -> Result<Self>
    where
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut loader = TableLoader::new(default);
        for line in lines {
            loader.insert_line(line.as_ref())?;
        }
        Ok(loader.finish())
    }

    /// Resolve the ploidy at 0-based position `pos` of `seqname`.
    ///
    /// If `sex2ploidy` is given, its first [`Self::sex_count`] slots are filled with the
    /// ploidy of each sex category, indexed by sex id. Slots past that are left untouched.
    /// When several regions for the same sex overlap `pos`, the one visited last in index
    /// order wins (for [`SortedRegionIndex`]: the one with the largest start, ties going
    /// to the one listed last in the input).
    pub fn query(
        &self,
        seqname: &str,
        pos: u64,
        mut sex2ploidy: Option<&mut [u32]>,
    ) -> PloidyQuery {
        if let Some(buf) = sex2ploidy.as_deref_mut() {
            for slot in buf.iter_mut().take(self.sexes.len()) {
                *slot = self.default;
            }
        }

        let mut overlap = false;
        let mut bounds: Option<(u32, u32)> = None;
        for sp in self.index.overlapping(seqname, pos) {
            overlap = true;
            if sp.ploidy == self.default {
                continue;
            }
            if let Some(slot) = sex2ploidy
                .as_deref_mut()
                .and_then(|buf| buf.get_mut(sp.sex))
            {
                *slot = sp.ploidy;
            }
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(sp.ploidy), max.max(sp.ploidy)),
                None => (sp.ploidy, sp.ploidy),
            });
        }

        let (min, max) = bounds.unwrap_or((self.default, self.default));
        PloidyQuery { overlap, min, max }
    }

    /// Like [`Self::query`], but allocates and returns the per-sex ploidy vector.
    pub fn sex_ploidies(&self, seqname: &str, pos: u64) -> (PloidyQuery, Vec<u32>) {
        let mut sex2ploidy = vec![self.default; self.sex_count()];
        let result = self.query(seqname, pos, Some(&mut sex2ploidy));
        (result, sex2ploidy)
    }

    /// Whether any region of the table contains `pos`
    pub fn overlaps(&self, seqname: &str, pos: u64) -> bool {
        self.index.overlapping(seqname, pos).next().is_some()
    }

    pub fn sex_count(&self) -> usize {
        self.sexes.len()
    }

    pub fn id_to_sex(&self, id: usize) -> Option<&str> {
        self.sexes.name(id)
    }

    pub fn sex_to_id(&self, name: &str) -> Option<usize> {
        self.sexes.lookup(name)
    }

    /// Register a sex category that no region mentions, returning its id. Names that are
    /// already known keep their id.
    pub fn add_sex(&mut self, name: &str) -> usize {
        self.sexes.lookup_or_create(name)
    }

    pub fn sexes(&self) -> &SexRegistry {
        &self.sexes
    }

    pub fn default_ploidy(&self) -> u32 {
        self.default
    }

    /// Smallest ploidy any position can have, including the default
    pub fn min_ploidy(&self) -> u32 {
        self.default.min(self.min)
    }

    /// Largest ploidy any position can have, including the default
    pub fn max_ploidy(&self) -> u32 {
        self.default.max(self.max)
    }

    pub fn regions(&self) -> &I {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str, default: u32) -> PloidyTable {
        PloidyTable::from_preset_str(text, default).unwrap()
    }

    #[test]
    fn single_region() {
        let t = table("chr1 100 200 M 1", 2);
        assert_eq!(Some(0), t.sex_to_id("M"));

        let (result, ploidies) = t.sex_ploidies("chr1", 150);
        assert_eq!(
            PloidyQuery {
                overlap: true,
                min: 1,
                max: 1
            },
            result
        );
        assert_eq!(vec![1], ploidies);

        let (result, ploidies) = t.sex_ploidies("chr1", 300);
        assert_eq!(
            PloidyQuery {
                overlap: false,
                min: 2,
                max: 2
            },
            result
        );
        assert_eq!(vec![2], ploidies);
    }

    #[test]
    fn one_region_per_sex() {
        let t = table("chrX 0 155270560 M 1\nchrX 0 155270560 F 2", 2);

        let (result, ploidies) = t.sex_ploidies("chrX", 5000);
        assert!(result.overlap);
        assert_eq!(vec![1, 2], ploidies);
        assert_eq!((1, 1), (result.min, result.max));

        let (result, ploidies) = t.sex_ploidies("chr1", 5000);
        assert!(!result.overlap);
        assert_eq!(vec![2, 2], ploidies);
    }

    #[test]
    fn default_valued_regions_do_not_move_query_bounds() {
        let t = table("chrX 1 1000 M 1\nchrX 1 1000 F 2\nchrX 1 1000 U 3", 2);
        let (result, ploidies) = t.sex_ploidies("chrX", 10);
        assert_eq!(vec![1, 2, 3], ploidies);
        assert_eq!((1, 3), (result.min, result.max));

        let t = table("chrX 1 1000 F 2", 2);
        let result = t.query("chrX", 10, None);
        assert_eq!(
            PloidyQuery {
                overlap: true,
                min: 2,
                max: 2
            },
            result
        );
    }

    #[test]
    fn last_overlapping_region_wins() {
        let t = table("chr2 1 1000 M 1\nchr2 1 1000 M 0", 2);
        let (result, ploidies) = t.sex_ploidies("chr2", 500);
        assert_eq!(vec![0], ploidies);
        // both regions still count towards the bounds
        assert_eq!((0, 1), (result.min, result.max));

        // later start is visited later regardless of input order
        let t = table("chr2 500 600 M 3\nchr2 1 1000 M 1", 2);
        assert_eq!(vec![3], t.sex_ploidies("chr2", 550).1);
        assert_eq!(vec![1], t.sex_ploidies("chr2", 700).1);
    }

    #[test]
    fn parse_time_bounds_include_default_valued_records() {
        let t = table("chr1 1 10 M 2\nchr1 20 30 M 4", 2);
        assert_eq!(2, t.min_ploidy());
        assert_eq!(4, t.max_ploidy());

        let t = table("chrY 1 10 F 0", 2);
        assert_eq!((0, 2), (t.min_ploidy(), t.max_ploidy()));
    }

    #[test]
    fn empty_table_bounds_equal_default() {
        let t = table("", 2);
        assert_eq!(0, t.sex_count());
        assert_eq!(2, t.min_ploidy());
        assert_eq!(2, t.max_ploidy());
        assert!(t.regions().is_empty());
        assert!(!t.overlaps("chr1", 1));
    }

    #[test]
    fn add_sex_is_idempotent() {
        let mut t = table("chrX 1 100 M 1", 2);
        assert_eq!(None, t.sex_to_id("F"));
        assert_eq!(1, t.add_sex("F"));
        assert_eq!(2, t.sex_count());
        assert_eq!(1, t.add_sex("F"));
        assert_eq!(2, t.sex_count());
        assert_eq!(0, t.add_sex("M"));
        assert_eq!(Some("F"), t.id_to_sex(1));
        assert_eq!(None, t.id_to_sex(2));

        // sexes registered after loading get the default everywhere
        assert_eq!(vec![1, 2], t.sex_ploidies("chrX", 50).1);
    }

    #[test]
    fn query_buffer_handling() {
        let t = table("chrX 1 100 M 1\nchrX 1 100 F 0", 2);

        // slots past sex_count are not touched
        let mut buf = [9, 9, 9];
        t.query("chrX", 5, Some(&mut buf));
        assert_eq!([1, 0, 9], buf);

        let mut buf = [9, 9, 9];
        t.query("chr1", 5, Some(&mut buf));
        assert_eq!([2, 2, 9], buf);

        // short buffers are filled as far as they go
        let mut buf = [9];
        let result = t.query("chrX", 5, Some(&mut buf));
        assert_eq!([1], buf);
        assert_eq!((0, 1), (result.min, result.max));
    }

    #[test]
    fn preset_string_whitespace_and_line_endings() {
        let t = table("  chr1 1 10 A 1 \r\n\r\n\tchr1 1 10 B 3\n   \n", 2);
        assert_eq!(2, t.regions().len());
        assert_eq!(vec![1, 3], t.sex_ploidies("chr1", 0).1);
    }

    #[test]
    fn same_input_same_ids() {
        let text = "chrX 1 100 M 1\nchrY 1 100 F 0\nchrY 1 100 M 1";
        let a = table(text, 2);
        let b = table(text, 2);
        for name in ["M", "F"] {
            assert_eq!(a.sex_to_id(name), b.sex_to_id(name));
        }
        assert_eq!(Some(1), a.sex_to_id("F"));
    }

    #[test]
    fn malformed_line_aborts_loading() {
        let err = PloidyTable::from_preset_str("chr1 1 10 M 1\nchr1 20 30 F", 2).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("chr1 20 30 F"));

        let err = PloidyTable::from_preset_str("chr1 ten 30 F 1", 2).unwrap_err();
        assert!(!err.is_fatal());
    }

    /// Unsorted list scanned front to back, so overlaps come out in input order
    struct LinearIndex(Vec<(Region, SexPloidy)>);

    impl RegionIndex<SexPloidy> for LinearIndex {
        fn build<I>(regions: I) -> Self
        where
            I: IntoIterator<Item = (Region, SexPloidy)>,
        {
            LinearIndex(regions.into_iter().collect())
        }

        fn overlapping<'a>(
            &'a self,
            seqname: &str,
            pos: u64,
        ) -> impl Iterator<Item = &'a SexPloidy> + 'a
        where
            SexPloidy: 'a,
        {
            let seqname = seqname.to_owned();
            self.0
                .iter()
                .filter(move |(r, _)| r.seqname == seqname && r.beg <= pos && pos <= r.end)
                .map(|(_, sp)| sp)
        }

        fn len(&self) -> usize {
            self.0.len()
        }
    }

    #[test]
    fn custom_index_backend() {
        let text = "chr2 500 600 M 3\nchr2 1 1000 M 1\nchr2 1 1000 F 0";
        let t: PloidyTable<LinearIndex> = PloidyTable::from_lines(text.lines(), 2).unwrap();
        assert_eq!(3, t.regions().len());
        assert_eq!((0, 3), (t.min_ploidy(), t.max_ploidy()));

        // input order: the later whole-chromosome M record wins over the inner one
        let (result, ploidies) = t.sex_ploidies("chr2", 550);
        assert!(result.overlap);
        assert_eq!(vec![1, 0], ploidies);
        assert_eq!((0, 3), (result.min, result.max));

        let (result, ploidies) = t.sex_ploidies("chr1", 550);
        assert!(!result.overlap);
        assert_eq!(vec![2, 2], ploidies);
        assert!(!t.overlaps("chr2", 1000));
    }

    #[test]
    fn builtin_presets() {
        let t = PloidyTable::from_preset("GRCh38", 2).unwrap();
        let m = t.sex_to_id("M").unwrap();
        let f = t.sex_to_id("F").unwrap();

        // non-PAR chrX
        let (_, ploidies) = t.sex_ploidies("chrX", 5_000_000);
        assert_eq!((1, 2), (ploidies[m], ploidies[f]));
        // PAR1
        let (result, ploidies) = t.sex_ploidies("chrX", 100_000);
        assert!(!result.overlap);
        assert_eq!((2, 2), (ploidies[m], ploidies[f]));
        // chrY
        let (result, ploidies) = t.sex_ploidies("chrY", 1_000_000);
        assert_eq!((1, 0), (ploidies[m], ploidies[f]));
        assert_eq!((0, 1), (result.min, result.max));

        assert_eq!((0, 2), (t.min_ploidy(), t.max_ploidy()));

        for preset in presets::PRESETS {
            assert!(PloidyTable::from_preset(preset.name, 2).is_ok());
        }
        assert!(matches!(
            PloidyTable::from_preset("hg19", 2),
            Err(PloidyError::UnknownPreset { .. })
        ));
    }
}
