//! Baseline selector and per-baseline requirement schema.
//!
//! The same schema backs the built-in registry tables and the optional
//! TOML/YAML override files, so every field defaults to empty.

use crate::error::UnknownBaseline;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// FedRAMP impact baseline.
pub enum Baseline {
    Low,
    Moderate,
    High,
}

impl Baseline {
    pub const ALL: [Baseline; 3] = [Baseline::Low, Baseline::Moderate, Baseline::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Baseline::Low => "low",
            Baseline::Moderate => "moderate",
            Baseline::High => "high",
        }
    }

    /// Capitalized name used in messages and requirement citations.
    pub fn title(&self) -> &'static str {
        match self {
            Baseline::Low => "Low",
            Baseline::Moderate => "Moderate",
            Baseline::High => "High",
        }
    }
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Baseline {
    type Err = UnknownBaseline;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Baseline::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownBaseline(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Named metadata checks a baseline may demand.
pub enum MetadataRequirement {
    SystemName,
    SystemId,
    AuthorizationBoundary,
    DataTypes,
    SystemCategorization,
    HighWaterMark,
}

impl MetadataRequirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataRequirement::SystemName => "system_name",
            MetadataRequirement::SystemId => "system_id",
            MetadataRequirement::AuthorizationBoundary => "authorization_boundary",
            MetadataRequirement::DataTypes => "data_types",
            MetadataRequirement::SystemCategorization => "system_categorization",
            MetadataRequirement::HighWaterMark => "high_water_mark",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Static requirements of one baseline.
pub struct BaselineRequirements {
    /// Lower-cased control ids, in catalogue order, without duplicates.
    pub required_controls: Vec<String>,
    /// Floor on the number of distinct implemented controls.
    pub min_controls: usize,
    pub required_metadata: Vec<MetadataRequirement>,
    /// Artifact categories expected among back-matter resources.
    pub required_artifacts: Vec<String>,
}

impl BaselineRequirements {
    pub const EMPTY: BaselineRequirements = BaselineRequirements {
        required_controls: Vec::new(),
        min_controls: 0,
        required_metadata: Vec::new(),
        required_artifacts: Vec::new(),
    };

    /// Lower-case and trim control ids, dropping blanks and repeats
    /// (first occurrence wins).
    pub fn normalized(mut self) -> Self {
        let mut seen = HashSet::new();
        self.required_controls = self
            .required_controls
            .into_iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty() && seen.insert(c.clone()))
            .collect();
        self.required_artifacts = self
            .required_artifacts
            .into_iter()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        self
    }

    pub fn requires_metadata(&self, req: MetadataRequirement) -> bool {
        self.required_metadata.contains(&req)
    }
}
