//! OSCAL document types and top-level key detection.

use crate::error::UnknownDocumentType;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// OSCAL model carried by a document; `Unknown` when no root key matches.
pub enum DocumentType {
    SystemSecurityPlan,
    Catalog,
    Profile,
    ComponentDefinition,
    AssessmentPlan,
    AssessmentResults,
    PlanOfActionAndMilestones,
    Unknown,
}

impl DocumentType {
    /// Known models in detection priority order.
    pub const DETECTION_ORDER: [DocumentType; 7] = [
        DocumentType::SystemSecurityPlan,
        DocumentType::Catalog,
        DocumentType::Profile,
        DocumentType::ComponentDefinition,
        DocumentType::AssessmentPlan,
        DocumentType::AssessmentResults,
        DocumentType::PlanOfActionAndMilestones,
    ];

    /// Canonical name, identical to the model's root key.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::SystemSecurityPlan => "system-security-plan",
            DocumentType::Catalog => "catalog",
            DocumentType::Profile => "profile",
            DocumentType::ComponentDefinition => "component-definition",
            DocumentType::AssessmentPlan => "assessment-plan",
            DocumentType::AssessmentResults => "assessment-results",
            DocumentType::PlanOfActionAndMilestones => "plan-of-action-and-milestones",
            DocumentType::Unknown => "unknown",
        }
    }

    /// Inspect top-level keys and return the first matching model.
    pub fn detect(document: &Json) -> DocumentType {
        let Some(obj) = document.as_object() else {
            return DocumentType::Unknown;
        };
        DocumentType::DETECTION_ORDER
            .into_iter()
            .find(|t| obj.contains_key(t.as_str()))
            .unwrap_or(DocumentType::Unknown)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        match wanted.as_str() {
            "ssp" => return Ok(DocumentType::SystemSecurityPlan),
            "poam" => return Ok(DocumentType::PlanOfActionAndMilestones),
            "unknown" => return Ok(DocumentType::Unknown),
            _ => {}
        }
        DocumentType::DETECTION_ORDER
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| UnknownDocumentType(s.to_string()))
    }
}
