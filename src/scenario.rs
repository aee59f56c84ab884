//! Scenario parameters and identity.
//!
//! A scenario describes the hypothetical therapeutic situation to
//! simulate: a compound, a setting, an optional target brain region, and
//! an optional research focus. Parameters are validated when built and
//! immutable for the duration of one simulation run.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::region::RegionCode;

/// Maximum length of the compound name.
pub const MAX_COMPOUND_LEN: usize = 128;

/// Globally unique scenario identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(Uuid);

impl ScenarioId {
    /// Creates a new random scenario ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ScenarioId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The setting the hypothetical session takes place in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    /// Supervised clinical environment.
    Clinical,
    /// Dedicated meditation space.
    MeditationSpace,
    /// Outdoor or natural environment.
    Nature,
    /// Private home environment.
    Home,
    /// Controlled laboratory environment.
    Laboratory,
}

impl Setting {
    /// Search vocabulary this setting contributes to keyword generation.
    #[must_use]
    pub const fn vocabulary(self) -> &'static [&'static str] {
        match self {
            Self::Clinical => &["clinical trial", "psychotherapy"],
            Self::MeditationSpace => &["meditation", "mindfulness"],
            Self::Nature => &["nature exposure", "outdoor environment"],
            Self::Home => &["naturalistic setting", "home environment"],
            Self::Laboratory => &["laboratory", "controlled setting"],
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Clinical => "clinical",
            Self::MeditationSpace => "meditation_space",
            Self::Nature => "nature",
            Self::Home => "home",
            Self::Laboratory => "laboratory",
        };
        write!(f, "{s}")
    }
}

/// Optional research angle for the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchFocus {
    Depression,
    Anxiety,
    Ptsd,
    Addiction,
    Neuroplasticity,
    Creativity,
}

impl ResearchFocus {
    /// Search terms this focus appends to keyword generation.
    #[must_use]
    pub const fn terms(self) -> &'static [&'static str] {
        match self {
            Self::Depression => &["depression", "treatment-resistant depression"],
            Self::Anxiety => &["anxiety", "anxiolytic"],
            Self::Ptsd => &["PTSD", "post-traumatic stress"],
            Self::Addiction => &["addiction", "substance use disorder"],
            Self::Neuroplasticity => &["neuroplasticity", "synaptic plasticity"],
            Self::Creativity => &["creativity", "divergent thinking"],
        }
    }
}

impl fmt::Display for ResearchFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Depression => "depression",
            Self::Anxiety => "anxiety",
            Self::Ptsd => "ptsd",
            Self::Addiction => "addiction",
            Self::Neuroplasticity => "neuroplasticity",
            Self::Creativity => "creativity",
        };
        write!(f, "{s}")
    }
}

/// Validated input parameters for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// The compound under consideration (e.g. "psilocybin").
    pub compound: String,
    /// The session setting.
    pub setting: Setting,

    /// Optional target brain region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionCode>,

    /// Optional research focus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_focus: Option<ResearchFocus>,
}

impl ScenarioParams {
    /// Starts building scenario parameters.
    #[must_use]
    pub fn builder() -> ScenarioParamsBuilder {
        ScenarioParamsBuilder::default()
    }
}

/// Fluent builder for [`ScenarioParams`].
#[derive(Debug, Clone, Default)]
pub struct ScenarioParamsBuilder {
    compound: Option<String>,
    setting: Option<Setting>,
    region: Option<RegionCode>,
    research_focus: Option<ResearchFocus>,
}

impl ScenarioParamsBuilder {
    /// Sets the compound.
    #[must_use]
    pub fn compound(mut self, compound: impl Into<String>) -> Self {
        self.compound = Some(compound.into());
        self
    }

    /// Sets the setting.
    #[must_use]
    pub fn setting(mut self, setting: Setting) -> Self {
        self.setting = Some(setting);
        self
    }

    /// Sets the target region by code.
    #[must_use]
    pub fn region(mut self, code: impl AsRef<str>) -> Self {
        self.region = Some(RegionCode::new(code));
        self
    }

    /// Sets the research focus.
    #[must_use]
    pub fn research_focus(mut self, focus: ResearchFocus) -> Self {
        self.research_focus = Some(focus);
        self
    }

    /// Validates and builds the parameters.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyCompound` if no compound was given
    /// (or it is blank), and `ValidationError::FieldTooLong` if the
    /// compound exceeds [`MAX_COMPOUND_LEN`].
    pub fn build(self) -> Result<ScenarioParams, ValidationError> {
        let compound = self
            .compound
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(ValidationError::EmptyCompound)?;

        if compound.chars().count() > MAX_COMPOUND_LEN {
            return Err(ValidationError::FieldTooLong {
                field: "compound".to_string(),
                max_length: MAX_COMPOUND_LEN,
            });
        }

        Ok(ScenarioParams {
            compound,
            setting: self.setting.unwrap_or(Setting::Clinical),
            region: self.region,
            research_focus: self.research_focus,
        })
    }
}

/// A persisted scenario: validated parameters plus identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Stable identifier.
    pub id: ScenarioId,
    /// The validated parameters.
    pub params: ScenarioParams,
    /// When the scenario was submitted.
    pub created_at: DateTime<Utc>,
}

impl Scenario {
    /// Wraps parameters with a fresh identity.
    #[must_use]
    pub fn new(params: ScenarioParams) -> Self {
        Self {
            id: ScenarioId::new(),
            params,
            created_at: Utc::now(),
        }
    }
}
