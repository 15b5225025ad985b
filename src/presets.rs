//! # Built-in ploidy tables
//!
//! Region definitions for the human reference assemblies, meant to be loaded with a
//! default ploidy of 2 and the sex categories `M` and `F`. Pseudo-autosomal regions are
//! the gaps between the listed chrX intervals.

pub struct Preset {
    pub name: &'static str,
    pub about: &'static str,
    pub regions: &'static str,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "GRCh37",
        about: "Human Genome reference assembly GRCh37 / hg19",
        regions: "X 1 60000 M 1
            X 2699521 154931043 M 1
            Y 1 59373566 M 1
            Y 1 59373566 F 0
            MT 1 16569 M 1
            MT 1 16569 F 1",
    },
    Preset {
        name: "GRCh38",
        about: "Human Genome reference assembly GRCh38 / hg38",
        regions: "chrX 1 9999 M 1
            chrX 2781480 155701381 M 1
            chrY 1 57227415 M 1
            chrY 1 57227415 F 0
            chrM 1 16569 M 1
            chrM 1 16569 F 1",
    },
];

/// Look up a preset by its exact (case-sensitive) name
pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.name == name)
}
