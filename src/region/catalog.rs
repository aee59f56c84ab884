//! Built-in region and connection catalog.
//!
//! A small, curated set of regions that commonly appear in the
//! therapeutic-neuroscience literature, so the crate is usable without an
//! external catalog. The persistence layer can replace or extend this.

use super::{BrainRegion, RegionConnection};

/// Returns the built-in region catalog.
#[must_use]
pub fn builtin_regions() -> Vec<BrainRegion> {
    vec![
        BrainRegion::new("A1", "primary auditory cortex")
            .with_alias("auditory cortex")
            .with_alias("primary auditory cortex"),
        BrainRegion::new("V1", "primary visual cortex")
            .with_alias("visual cortex")
            .with_alias("primary visual cortex")
            .with_alias("striate cortex"),
        BrainRegion::new("CA1", "hippocampal CA1 subfield")
            .with_alias("cornu ammonis 1"),
        BrainRegion::new("CA3", "hippocampal CA3 subfield")
            .with_alias("cornu ammonis 3"),
        BrainRegion::new("HPC", "hippocampus")
            .with_alias("hippocampus")
            .with_alias("hippocampal formation"),
        BrainRegion::new("PFC", "prefrontal cortex")
            .with_alias("prefrontal cortex"),
        BrainRegion::new("MPFC", "medial prefrontal cortex")
            .with_alias("mPFC")
            .with_alias("medial prefrontal cortex"),
        BrainRegion::new("ACC", "anterior cingulate cortex")
            .with_alias("anterior cingulate cortex")
            .with_alias("anterior cingulate"),
        BrainRegion::new("AMY", "amygdala").with_alias("amygdala"),
        BrainRegion::new("INS", "insula")
            .with_alias("insula")
            .with_alias("insular cortex"),
        BrainRegion::new("THL", "thalamus").with_alias("thalamus"),
        BrainRegion::new("DRN", "dorsal raphe nucleus")
            .with_alias("dorsal raphe nucleus")
            .with_alias("dorsal raphe"),
        BrainRegion::new("NAC", "nucleus accumbens")
            .with_alias("NAc")
            .with_alias("nucleus accumbens"),
        BrainRegion::new("OFC", "orbitofrontal cortex")
            .with_alias("orbitofrontal cortex"),
    ]
}

/// Returns the built-in connection catalog.
///
/// Strengths are coarse anatomical weights, not measurements.
#[must_use]
pub fn builtin_connections() -> Vec<RegionConnection> {
    let pairs: &[(&str, &str, f32)] = &[
        ("CA3", "CA1", 0.9),
        ("CA1", "HPC", 0.8),
        ("HPC", "MPFC", 0.7),
        ("AMY", "MPFC", 0.7),
        ("AMY", "HPC", 0.6),
        ("THL", "V1", 0.8),
        ("THL", "A1", 0.8),
        ("PFC", "ACC", 0.7),
        ("ACC", "INS", 0.6),
        ("DRN", "PFC", 0.5),
        ("NAC", "PFC", 0.6),
        ("OFC", "AMY", 0.6),
    ];

    pairs
        .iter()
        .filter_map(|&(from, to, strength)| RegionConnection::new(from, to, strength).ok())
        .collect()
}
