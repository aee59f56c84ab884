//! Contextual validation of short region aliases.
//!
//! Short codes like "A1", "V1", "CA1" also show up as gene symbols, list
//! markers, and unrelated jargon. The validator is a bounded heuristic
//! classifier: it looks at a fixed window of text around the match and
//! decides from lexical cues whether the alias denotes a brain region in
//! that sentence. It never fails; degenerate input is rejected, and ties
//! between conflicting cues resolve toward rejection, since a false
//! region attribution corrupts every downstream confidence score.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use super::{MentionCandidate, MentionVerdict, ReasonCode};
use crate::region::SHORT_ALIAS_MAX;

/// Terms that indicate the surrounding text is talking about
/// neuroanatomy or brain function.
const NEURO_CUES: &[&str] = &[
    "cortex",
    "cortical",
    "region",
    "brain",
    "neural",
    "neuronal",
    "neuron",
    "connectivity",
    "hippocampal",
    "hippocampus",
    "visual cortex",
    "auditory cortex",
    "auditory",
    "visual",
    "synaptic",
    "plasticity",
    "bold",
    "fmri",
    "activation",
    "subfield",
    "thalamic",
    "thalamus",
    "amygdala",
    "limbic",
    "stimulation",
    "stimuli",
    "stimulus",
];

/// Terms that indicate the surrounding text is talking about genes,
/// proteins, or molecular biology, the classic false-positive source
/// for two-letter region codes.
const MOLECULAR_CUES: &[&str] = &[
    "gene",
    "protein",
    "receptor",
    "variant",
    "expression",
    "kinase",
    "mutant",
    "mutation",
    "enhancer",
    "binding protein",
    "allele",
    "polymorphism",
    "transcription",
    "mrna",
    "knockout",
];

fn gene_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]+[0-9][A-Za-z0-9]*$").expect("static regex"))
}

/// Returns true for tokens shaped like gene nomenclature (`Nr4a1`,
/// `Slc6a4`, `MAP2K1`). Short all-caps codes ("CA1", "V1") are excluded:
/// gene symbols in that style are almost always four characters or more.
fn is_gene_like(token: &str) -> bool {
    if !gene_token_regex().is_match(token) {
        return false;
    }
    let has_lower = token.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = token.chars().any(|c| c.is_ascii_uppercase());
    (has_lower && has_upper) || (has_upper && !has_lower && token.len() >= 4)
}

/// Validator configuration.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Aliases longer than this (in characters) are accepted without
    /// contextual support.
    pub long_alias_threshold: usize,
    /// Context window size in bytes, each direction, clipped at text
    /// boundaries.
    pub context_window: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            long_alias_threshold: SHORT_ALIAS_MAX,
            context_window: 50,
        }
    }
}

/// Decides whether an alias occurrence is a genuine brain-region mention.
#[derive(Debug, Clone, Default)]
pub struct MentionValidator {
    config: ValidatorConfig,
}

impl MentionValidator {
    /// Creates a validator with the given configuration.
    #[must_use]
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Validates one scanned candidate.
    #[must_use]
    pub fn validate<'a>(&self, candidate: MentionCandidate<'a>) -> MentionVerdict<'a> {
        let reason = self.classify(candidate.source_text, candidate.position, candidate.alias);
        MentionVerdict {
            candidate,
            is_valid: reason.is_accepted(),
            reason,
        }
    }

    /// Boolean form of the contract: is the alias at `match_position` a
    /// genuine region mention? `match_position` is a byte offset of the
    /// (case-insensitive) alias match within `text`.
    #[must_use]
    pub fn is_valid_mention(&self, text: &str, match_position: usize, alias: &str) -> bool {
        self.classify(text, match_position, alias).is_accepted()
    }

    /// Classifies a match and returns the reason code. Total over
    /// degenerate inputs: malformed positions reject, they never panic.
    #[must_use]
    pub fn classify(&self, text: &str, match_position: usize, alias: &str) -> ReasonCode {
        let Some(end) = self.checked_match_range(text, match_position, alias) else {
            return ReasonCode::MalformedInput;
        };

        if alias.chars().count() > self.config.long_alias_threshold {
            return ReasonCode::LongAliasAccepted;
        }

        // Token-boundary signal beats everything else: an alias that is
        // the tail of a larger alphanumeric identifier is a gene symbol,
        // not a region, no matter what vocabulary surrounds it.
        if self.embedded_in_larger_token(text, match_position, end) {
            return ReasonCode::GeneAdjacencyRejected;
        }

        let window = extract_window(text, match_position, end, self.config.context_window);
        let window_lower = window.to_lowercase();

        let neuro = NEURO_CUES
            .iter()
            .filter(|cue| window_lower.contains(*cue))
            .count();

        let mut molecular = MOLECULAR_CUES
            .iter()
            .filter(|cue| window_lower.contains(*cue))
            .count();
        molecular += gene_like_tokens(window, alias);

        if neuro == 0 && molecular == 0 {
            ReasonCode::NoContextRejected
        } else if neuro > 0 && neuro > molecular {
            ReasonCode::NeuroContextAccepted
        } else {
            ReasonCode::MolecularContextRejected
        }
    }

    /// Returns the exclusive end offset of the match, or `None` for
    /// malformed input.
    fn checked_match_range(&self, text: &str, position: usize, alias: &str) -> Option<usize> {
        if text.is_empty() || alias.is_empty() {
            return None;
        }
        if position >= text.len() || !text.is_char_boundary(position) {
            return None;
        }
        let end = position.checked_add(alias.len())?;
        if end > text.len() || !text.is_char_boundary(end) {
            return None;
        }
        if !text[position..end].eq_ignore_ascii_case(alias) {
            return None;
        }
        Some(end)
    }

    fn embedded_in_larger_token(&self, text: &str, start: usize, end: usize) -> bool {
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        before.is_some_and(|c| c.is_alphanumeric()) || after.is_some_and(|c| c.is_alphanumeric())
    }
}

/// Counts distinct gene-shaped tokens in the window, excluding the alias
/// itself (region codes share the letters-plus-digit shape).
fn gene_like_tokens(window: &str, alias: &str) -> usize {
    let mut seen: HashSet<&str> = HashSet::new();
    window
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .filter(|token| !token.eq_ignore_ascii_case(alias))
        .filter(|token| is_gene_like(token))
        .filter(|token| seen.insert(token))
        .count()
}

/// Extracts a window of `radius` bytes each direction around the match,
/// clipped (not padded) at text boundaries and snapped to character
/// boundaries.
fn extract_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let mut lo = start.saturating_sub(radius);
    while lo > 0 && !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = end.saturating_add(radius).min(text.len());
    while hi < text.len() && !text.is_char_boundary(hi) {
        hi += 1;
    }
    &text[lo..hi]
}
