//! Alias dictionary for brain regions.
//!
//! The dictionary is leaf data: a mapping from lowercase alias to the
//! region it denotes, built once at startup from the region catalog and
//! shared read-only across concurrent simulation runs. Whether an alias
//! is "short" (and therefore ambiguous in running text) is decided here
//! and consumed by the mention validator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{BrainRegion, RegionCode};

/// Aliases of this length or shorter are ambiguous and require
/// contextual support before a mention is accepted.
pub const SHORT_ALIAS_MAX: usize = 3;

/// One alias entry: the textual form and the region it canonically names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionAlias {
    /// Canonical code of the region this alias denotes.
    pub region_code: RegionCode,
    /// The alias as it appears in text.
    pub alias: String,
    /// True if the alias is short enough to be ambiguous.
    pub is_short: bool,
}

impl RegionAlias {
    /// Creates an alias entry, deriving `is_short` from the alias length.
    #[must_use]
    pub fn new(region_code: RegionCode, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        let is_short = alias.chars().count() <= SHORT_ALIAS_MAX;
        Self {
            region_code,
            alias,
            is_short,
        }
    }
}

/// Immutable alias lookup table, keyed by lowercase alias.
///
/// Loaded once at process start and shared by reference; there is no
/// mutation after load, so no synchronization is needed.
#[derive(Debug, Clone, Default)]
pub struct AliasDictionary {
    entries: Vec<RegionAlias>,
    by_alias: HashMap<String, usize>,
}

impl AliasDictionary {
    /// Builds a dictionary from a region catalog.
    ///
    /// Duplicate aliases keep the first region that claimed them.
    #[must_use]
    pub fn from_regions(regions: &[BrainRegion]) -> Self {
        let mut dict = Self::default();
        for region in regions {
            for alias in &region.aliases {
                dict.insert(RegionAlias::new(region.code.clone(), alias.clone()));
            }
        }
        dict
    }

    fn insert(&mut self, entry: RegionAlias) {
        let key = entry.alias.trim().to_lowercase();
        if key.is_empty() || self.by_alias.contains_key(&key) {
            return;
        }
        self.by_alias.insert(key, self.entries.len());
        self.entries.push(entry);
    }

    /// Looks up an alias (case-insensitive).
    #[must_use]
    pub fn lookup(&self, alias: &str) -> Option<&RegionAlias> {
        let key = alias.trim().to_lowercase();
        self.by_alias.get(&key).map(|&idx| &self.entries[idx])
    }

    /// Returns all aliases that denote the given region.
    pub fn aliases_for<'a>(
        &'a self,
        code: &'a RegionCode,
    ) -> impl Iterator<Item = &'a RegionAlias> + 'a {
        self.entries.iter().filter(move |e| &e.region_code == code)
    }

    /// Iterates over every alias entry.
    pub fn iter(&self) -> impl Iterator<Item = &RegionAlias> {
        self.entries.iter()
    }

    /// Number of distinct aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the dictionary holds no aliases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
