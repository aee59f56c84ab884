//! Brain region types and identity management.
//!
//! Regions are the anchor of the research-grounding pipeline: scenario
//! parameters name a target region, literature mentions are validated
//! against the region alias dictionary, and the static region/connection
//! catalog is what the persistence layer serves.

mod aliases;
mod catalog;

pub use aliases::{AliasDictionary, RegionAlias, SHORT_ALIAS_MAX};
pub use catalog::{builtin_connections, builtin_regions};

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Globally unique, stable region identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(Uuid);

impl RegionId {
    /// Creates a new random region ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a region ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for RegionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical short code for a brain region (e.g. `A1`, `CA1`, `PFC`).
///
/// Codes are normalized to uppercase so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionCode(String);

impl RegionCode {
    /// Creates a region code, normalizing to uppercase.
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the code is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RegionCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// A brain region in the static catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainRegion {
    /// Stable identifier.
    pub id: RegionId,
    /// Canonical short code.
    pub code: RegionCode,
    /// Canonical descriptive name (e.g. "primary auditory cortex").
    pub name: String,
    /// Known textual aliases, including the code itself.
    pub aliases: Vec<String>,

    /// Optional free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BrainRegion {
    /// Creates a new region with a fresh ID.
    #[must_use]
    pub fn new(code: impl AsRef<str>, name: impl Into<String>) -> Self {
        let code = RegionCode::new(code);
        Self {
            id: RegionId::new(),
            name: name.into(),
            aliases: vec![code.as_str().to_string()],
            code,
            description: None,
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A directed anatomical connection between two catalog regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConnection {
    /// Source region code.
    pub from: RegionCode,
    /// Target region code.
    pub to: RegionCode,
    /// Connection strength (0.0 to 1.0).
    pub strength: f32,
}

impl RegionConnection {
    /// Creates a connection with validation.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::ConnectionStrengthOutOfRange` if the
    /// strength is not in [0.0, 1.0].
    pub fn new(
        from: impl AsRef<str>,
        to: impl AsRef<str>,
        strength: f32,
    ) -> Result<Self, ValidationError> {
        if strength.is_nan() || !(0.0..=1.0).contains(&strength) {
            return Err(ValidationError::ConnectionStrengthOutOfRange { value: strength });
        }
        Ok(Self {
            from: RegionCode::new(from),
            to: RegionCode::new(to),
            strength,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_code_normalizes() {
        assert_eq!(RegionCode::new("ca1").as_str(), "CA1");
        assert_eq!(RegionCode::new("  pfc "), RegionCode::new("PFC"));
    }

    #[test]
    fn test_region_id_unique() {
        assert_ne!(RegionId::new(), RegionId::new());
    }

    #[test]
    fn test_brain_region_builder() {
        let region = BrainRegion::new("a1", "primary auditory cortex")
            .with_alias("auditory cortex")
            .with_description("Heschl's gyrus");

        assert_eq!(region.code.as_str(), "A1");
        assert!(region.aliases.contains(&"A1".to_string()));
        assert!(region.aliases.contains(&"auditory cortex".to_string()));
        assert!(region.description.is_some());
    }

    #[test]
    fn test_connection_strength_validation() {
        assert!(RegionConnection::new("CA3", "CA1", 0.9).is_ok());
        assert!(RegionConnection::new("CA3", "CA1", 1.2).is_err());
        assert!(RegionConnection::new("CA3", "CA1", f32::NAN).is_err());
    }

    #[test]
    fn test_region_serialization() {
        let region = BrainRegion::new("V1", "primary visual cortex");
        let json = serde_json::to_string(&region).unwrap();
        let back: BrainRegion = serde_json::from_str(&json).unwrap();
        assert_eq!(region, back);
    }
}
