//! Mention candidates, verdicts, and alias scanning.
//!
//! A mention is one occurrence of a region alias inside a literature
//! record's text. Candidates and verdicts borrow from the text they were
//! found in, so they cannot outlive the record evaluation that produced
//! them; the scorer keeps an owned summary of the mentions it accepts.

mod validator;

pub use validator::{MentionValidator, ValidatorConfig};

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::region::{AliasDictionary, RegionCode};

/// Why a mention was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Long aliases are unambiguous and accepted without context.
    LongAliasAccepted,
    /// Neuroanatomical vocabulary in the window supported the mention.
    NeuroContextAccepted,
    /// The alias was embedded in a larger identifier (gene nomenclature).
    GeneAdjacencyRejected,
    /// Molecular vocabulary dominated the window.
    MolecularContextRejected,
    /// No supporting context around a short alias.
    NoContextRejected,
    /// Degenerate input (empty text, out-of-range position, mismatch).
    MalformedInput,
}

impl ReasonCode {
    /// Returns true if this reason accompanies an accepted mention.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::LongAliasAccepted | Self::NeuroContextAccepted)
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::LongAliasAccepted => "long_alias_accepted",
            Self::NeuroContextAccepted => "neuro_context_accepted",
            Self::GeneAdjacencyRejected => "gene_adjacency_rejected",
            Self::MolecularContextRejected => "molecular_context_rejected",
            Self::NoContextRejected => "no_context_rejected",
            Self::MalformedInput => "malformed_input",
        };
        write!(f, "{s}")
    }
}

/// One occurrence of a region alias inside a text.
///
/// `position` is a byte offset into `source_text` and always lies on a
/// character boundary when produced by [`MentionScanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MentionCandidate<'a> {
    /// The full text the alias was found in (title + abstract).
    pub source_text: &'a str,
    /// Byte offset of the match.
    pub position: usize,
    /// The matched alias text, as it appears in the source.
    pub alias: &'a str,
}

impl MentionCandidate<'_> {
    /// Alias length in characters.
    #[must_use]
    pub fn alias_length(&self) -> usize {
        self.alias.chars().count()
    }
}

/// The validator's decision for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MentionVerdict<'a> {
    /// The candidate this verdict is about.
    pub candidate: MentionCandidate<'a>,
    /// Accept/reject decision.
    pub is_valid: bool,
    /// Informational reason; not control flow.
    pub reason: ReasonCode,
}

/// A compiled word-boundary pattern for one alias.
#[derive(Debug, Clone)]
struct AliasPattern {
    alias: String,
    region_code: RegionCode,
    regex: Regex,
}

/// Finds alias occurrences in record text.
///
/// Patterns are compiled once from the alias dictionary and shared
/// read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MentionScanner {
    patterns: Vec<AliasPattern>,
}

impl MentionScanner {
    /// Compiles word-boundary patterns for every alias in the dictionary.
    #[must_use]
    pub fn from_dictionary(dictionary: &AliasDictionary) -> Self {
        let patterns = dictionary
            .iter()
            .filter_map(|entry| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(&entry.alias));
                Regex::new(&pattern).ok().map(|regex| AliasPattern {
                    alias: entry.alias.clone(),
                    region_code: entry.region_code.clone(),
                    regex,
                })
            })
            .collect();
        Self { patterns }
    }

    /// Returns every alias occurrence in `text`, in alias-then-position
    /// order.
    #[must_use]
    pub fn scan<'a>(&self, text: &'a str) -> Vec<MentionCandidate<'a>> {
        let mut candidates = Vec::new();
        for pattern in &self.patterns {
            for m in pattern.regex.find_iter(text) {
                candidates.push(MentionCandidate {
                    source_text: text,
                    position: m.start(),
                    alias: m.as_str(),
                });
            }
        }
        candidates
    }

    /// Resolves the region a scanned alias denotes.
    #[must_use]
    pub fn region_for(&self, alias: &str) -> Option<&RegionCode> {
        self.patterns
            .iter()
            .find(|p| p.alias.eq_ignore_ascii_case(alias))
            .map(|p| &p.region_code)
    }

    /// Number of compiled alias patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if no patterns were compiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
