//! Baseline requirement registry.
//!
//! Built once at startup (from the compiled-in tables or an override file)
//! and then only read, so a single instance can be shared behind an `Arc`
//! across any number of concurrent validations.
//!
//! The `high` control list is intentionally empty: only the floor of 421
//! controls is known here, so the insufficient-controls rule dominates high
//! baseline results until a full control list is supplied via a registry
//! file.

use crate::error::ConfigError;
use crate::models::{Baseline, BaselineRequirements, MetadataRequirement};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[rustfmt::skip]
const LOW_CONTROLS: &[&str] = &[
    "ac-1", "ac-2", "ac-3", "ac-7", "ac-8", "ac-14", "ac-17", "ac-18", "ac-19", "ac-20", "ac-22",
    "at-1", "at-2", "at-3", "at-4",
    "au-1", "au-2", "au-3", "au-4", "au-5", "au-6", "au-8", "au-9", "au-11", "au-12",
    "ca-1", "ca-2", "ca-3", "ca-5", "ca-6", "ca-7", "ca-9",
    "cm-1", "cm-2", "cm-4", "cm-5", "cm-6", "cm-7", "cm-8", "cm-10", "cm-11",
    "cp-1", "cp-2", "cp-3", "cp-4", "cp-9", "cp-10",
    "ia-1", "ia-2", "ia-4", "ia-5", "ia-6", "ia-7", "ia-8",
    "ir-1", "ir-2", "ir-4", "ir-5", "ir-6", "ir-7", "ir-8",
    "ma-1", "ma-2", "ma-4", "ma-5",
    "mp-1", "mp-2", "mp-6", "mp-7",
    "pe-1", "pe-2", "pe-3", "pe-6", "pe-8", "pe-12", "pe-13", "pe-14", "pe-15", "pe-16",
    "pl-1", "pl-2", "pl-4",
    "ps-1", "ps-2", "ps-3", "ps-4", "ps-5", "ps-6", "ps-7", "ps-8",
    "ra-1", "ra-2", "ra-3", "ra-5",
    "sa-1", "sa-2", "sa-3", "sa-4", "sa-5", "sa-9",
    "sc-1", "sc-2", "sc-4", "sc-5", "sc-7", "sc-12", "sc-13", "sc-15", "sc-20", "sc-21", "sc-22",
    "si-1", "si-2", "si-3", "si-4", "si-5", "si-12",
];

#[rustfmt::skip]
const MODERATE_CONTROLS: &[&str] = &[
    "ac-1", "ac-2", "ac-3", "ac-4", "ac-5", "ac-6", "ac-7", "ac-8", "ac-11", "ac-12",
    "ac-14", "ac-17", "ac-18", "ac-19", "ac-20", "ac-22",
    "at-1", "at-2", "at-3", "at-4",
    "au-1", "au-2", "au-3", "au-4", "au-5", "au-6", "au-7", "au-8", "au-9", "au-10",
    "au-11", "au-12",
    "ca-1", "ca-2", "ca-3", "ca-5", "ca-6", "ca-7", "ca-8", "ca-9",
    "cm-1", "cm-2", "cm-3", "cm-4", "cm-5", "cm-6", "cm-7", "cm-8", "cm-9", "cm-10",
    "cm-11",
    "cp-1", "cp-2", "cp-3", "cp-4", "cp-6", "cp-7", "cp-8", "cp-9", "cp-10",
    "ia-1", "ia-2", "ia-3", "ia-4", "ia-5", "ia-6", "ia-7", "ia-8", "ia-11",
    "ir-1", "ir-2", "ir-3", "ir-4", "ir-5", "ir-6", "ir-7", "ir-8",
    "ma-1", "ma-2", "ma-3", "ma-4", "ma-5", "ma-6",
    "mp-1", "mp-2", "mp-3", "mp-4", "mp-5", "mp-6", "mp-7",
    "pe-1", "pe-2", "pe-3", "pe-4", "pe-5", "pe-6", "pe-8", "pe-9", "pe-10",
    "pe-11", "pe-12", "pe-13", "pe-14", "pe-15", "pe-16", "pe-17",
    "pl-1", "pl-2", "pl-4", "pl-8",
    "ps-1", "ps-2", "ps-3", "ps-4", "ps-5", "ps-6", "ps-7", "ps-8",
    "ra-1", "ra-2", "ra-3", "ra-5",
    "sa-1", "sa-2", "sa-3", "sa-4", "sa-5", "sa-8", "sa-9", "sa-10",
    "sc-1", "sc-2", "sc-3", "sc-4", "sc-5", "sc-7", "sc-8", "sc-10", "sc-11",
    "sc-12", "sc-13", "sc-15", "sc-17", "sc-18", "sc-19", "sc-20", "sc-21", "sc-22", "sc-23",
    "si-1", "si-2", "si-3", "si-4", "si-5", "si-6", "si-7", "si-8", "si-10", "si-11", "si-12",
];

const LOW_ARTIFACTS: &[&str] = &["system-security-plan", "rules-of-behavior"];

const MODERATE_ARTIFACTS: &[&str] = &[
    "system-security-plan",
    "rules-of-behavior",
    "privacy-impact-assessment",
    "contingency-plan",
    "configuration-management-plan",
];

const HIGH_ARTIFACTS: &[&str] = &[
    "system-security-plan",
    "rules-of-behavior",
    "privacy-impact-assessment",
    "contingency-plan",
    "configuration-management-plan",
    "incident-response-plan",
    "system-security-architecture",
    "penetration-test-results",
];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Read-only mapping from baseline to its requirements.
pub struct BaselineRegistry {
    low: BaselineRequirements,
    moderate: BaselineRequirements,
    high: BaselineRequirements,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    #[serde(default)]
    low: BaselineRequirements,
    #[serde(default)]
    moderate: BaselineRequirements,
    #[serde(default)]
    high: BaselineRequirements,
}

impl From<RegistryFile> for BaselineRegistry {
    fn from(file: RegistryFile) -> Self {
        Self {
            low: file.low.normalized(),
            moderate: file.moderate.normalized(),
            high: file.high.normalized(),
        }
    }
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for BaselineRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BaselineRegistry {
    /// The compiled-in FedRAMP tables.
    pub fn builtin() -> Self {
        use MetadataRequirement::*;
        Self {
            low: BaselineRequirements {
                required_controls: owned(LOW_CONTROLS),
                min_controls: 108,
                required_metadata: vec![SystemName, SystemId, AuthorizationBoundary],
                required_artifacts: owned(LOW_ARTIFACTS),
            }
            .normalized(),
            moderate: BaselineRequirements {
                required_controls: owned(MODERATE_CONTROLS),
                min_controls: 325,
                required_metadata: vec![SystemName, SystemId, AuthorizationBoundary, DataTypes],
                required_artifacts: owned(MODERATE_ARTIFACTS),
            }
            .normalized(),
            high: BaselineRequirements {
                required_controls: Vec::new(),
                min_controls: 421,
                required_metadata: vec![
                    SystemName,
                    SystemId,
                    AuthorizationBoundary,
                    DataTypes,
                    SystemCategorization,
                    HighWaterMark,
                ],
                required_artifacts: owned(HIGH_ARTIFACTS),
            }
            .normalized(),
        }
    }

    /// Assemble a registry from explicit per-baseline values.
    pub fn from_parts(
        low: BaselineRequirements,
        moderate: BaselineRequirements,
        high: BaselineRequirements,
    ) -> Self {
        Self {
            low: low.normalized(),
            moderate: moderate.normalized(),
            high: high.normalized(),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RegistryFile>(s).map(Self::from)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str::<RegistryFile>(s).map(Self::from)
    }

    /// Load a registry override file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let read = || {
            fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        match ext.as_deref() {
            Some("toml") => Self::from_toml_str(&read()?).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            }),
            Some("yaml" | "yml") => {
                Self::from_yaml_str(&read()?).map_err(|source| ConfigError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })
            }
            _ => Err(ConfigError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn requirements_for(&self, baseline: Baseline) -> &BaselineRequirements {
        match baseline {
            Baseline::Low => &self.low,
            Baseline::Moderate => &self.moderate,
            Baseline::High => &self.high,
        }
    }

    /// Lookup by name; unrecognized names resolve to the empty value.
    pub fn requirements_for_name(&self, name: &str) -> &BaselineRequirements {
        static EMPTY: BaselineRequirements = BaselineRequirements::EMPTY;
        match name.parse::<Baseline>() {
            Ok(baseline) => self.requirements_for(baseline),
            Err(_) => &EMPTY,
        }
    }
}
