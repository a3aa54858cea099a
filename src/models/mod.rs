//! Shared data models: findings, validation results, baselines and
//! document types.

pub mod baseline;
pub mod document;

pub use baseline::{Baseline, BaselineRequirements, MetadataRequirement};
pub use document::DocumentType;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as Json;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Issue severity. Only `Error` affects compliance.
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! issue_codes {
    ($($variant:ident => $code:literal,)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        /// Stable machine-readable issue identifiers.
        pub enum IssueCode {
            $($variant,)+
        }

        impl IssueCode {
            pub const ALL: &'static [IssueCode] = &[$(IssueCode::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(IssueCode::$variant => $code,)+
                }
            }
        }
    };
}

issue_codes! {
    MissingElement => "FEDRAMP_MISSING_ELEMENT",
    InvalidUuid => "FEDRAMP_INVALID_UUID",
    MissingSystemName => "FEDRAMP_MISSING_SYSTEM_NAME",
    MissingSystemId => "FEDRAMP_MISSING_SYSTEM_ID",
    MissingVersion => "FEDRAMP_MISSING_VERSION",
    MissingLastModified => "FEDRAMP_MISSING_LAST_MODIFIED",
    MissingControlStatements => "FEDRAMP_MISSING_CONTROL_STATEMENTS",
    MissingResponsibleRoles => "FEDRAMP_MISSING_RESPONSIBLE_ROLES",
    MissingRequiredControl => "FEDRAMP_MISSING_REQUIRED_CONTROL",
    InsufficientControls => "FEDRAMP_INSUFFICIENT_CONTROLS",
    MissingRole => "FEDRAMP_MISSING_ROLE",
    RoleWithoutParty => "FEDRAMP_ROLE_WITHOUT_PARTY",
    NoComponents => "FEDRAMP_NO_COMPONENTS",
    ComponentMissingUuid => "FEDRAMP_COMPONENT_MISSING_UUID",
    ComponentMissingType => "FEDRAMP_COMPONENT_MISSING_TYPE",
    ComponentMissingTitle => "FEDRAMP_COMPONENT_MISSING_TITLE",
    MissingAuthBoundary => "FEDRAMP_MISSING_AUTH_BOUNDARY",
    InsufficientAuthBoundary => "FEDRAMP_INSUFFICIENT_AUTH_BOUNDARY",
    MissingNetworkArch => "FEDRAMP_MISSING_NETWORK_ARCH",
    MissingDataFlow => "FEDRAMP_MISSING_DATA_FLOW",
    MissingArtifact => "FEDRAMP_MISSING_ARTIFACT",
    UnsupportedDocument => "FEDRAMP_UNSUPPORTED_DOCUMENT",
    ValidationError => "FEDRAMP_VALIDATION_ERROR",
    ValidationFailed => "FEDRAMP_VALIDATION_FAILED",
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IssueCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IssueCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        IssueCode::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown issue code '{raw}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A single validation finding with severity and optional location.
pub struct Issue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    /// Dotted path into the document tree.
    pub location: Option<String>,
    /// Citation of the governing requirement.
    pub requirement: Option<String>,
    pub baseline: Option<Baseline>,
    pub suggested_fix: Option<String>,
    pub context: Option<BTreeMap<String, Json>>,
}

impl Issue {
    pub fn new(severity: Severity, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            location: None,
            requirement: None,
            baseline: None,
            suggested_fix: None,
            context: None,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    pub fn info(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, code, message)
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirement = Some(requirement.into());
        self
    }

    pub fn for_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn fix(mut self, suggestion: impl Into<String>) -> Self {
        self.suggested_fix = Some(suggestion.into());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Json>) -> Self {
        self.context
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Derived counts and timestamp of one validation run.
pub struct ResultMetadata {
    pub total_issues: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub validation_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Outcome of one validation run. Compliance and counts are derived from
/// the issues at construction and cannot drift afterwards.
pub struct ValidationResult {
    is_compliant: bool,
    baseline: Baseline,
    document_type: DocumentType,
    issues: Vec<Issue>,
    validation_time_ms: u64,
    metadata: ResultMetadata,
}

impl ValidationResult {
    pub(crate) fn assemble(
        baseline: Baseline,
        document_type: DocumentType,
        issues: Vec<Issue>,
        started_at: DateTime<Utc>,
        elapsed: Duration,
        note: Option<String>,
    ) -> Self {
        let count = |sev: Severity| issues.iter().filter(|i| i.severity == sev).count();
        let metadata = ResultMetadata {
            total_issues: issues.len(),
            error_count: count(Severity::Error),
            warning_count: count(Severity::Warning),
            info_count: count(Severity::Info),
            validation_date: started_at,
            note,
        };
        Self {
            is_compliant: metadata.error_count == 0,
            baseline,
            document_type,
            issues,
            validation_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            metadata,
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.is_compliant
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn validation_time_ms(&self) -> u64 {
        self.validation_time_ms
    }

    pub fn metadata(&self) -> &ResultMetadata {
        &self.metadata
    }

    pub fn error_count(&self) -> usize {
        self.metadata.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.metadata.warning_count
    }

    /// Issues carrying `code`, in report order.
    pub fn issues_with(&self, code: IssueCode) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_of(issues: Vec<Issue>) -> ValidationResult {
        ValidationResult::assemble(
            Baseline::Moderate,
            DocumentType::SystemSecurityPlan,
            issues,
            Utc::now(),
            Duration::from_millis(3),
            None,
        )
    }

    #[test]
    fn test_compliance_ignores_warnings_and_infos() {
        let res = result_of(vec![
            Issue::warning(IssueCode::MissingVersion, "w"),
            Issue::info(IssueCode::UnsupportedDocument, "i"),
        ]);
        assert!(res.is_compliant());
        assert_eq!(res.warning_count(), 1);
        assert_eq!(res.metadata().info_count, 1);
        assert_eq!(res.validation_time_ms(), 3);
    }

    #[test]
    fn test_adding_errors_never_restores_compliance() {
        let mut issues = vec![Issue::error(IssueCode::NoComponents, "e")];
        assert!(!result_of(issues.clone()).is_compliant());
        issues.push(Issue::error(IssueCode::MissingRole, "e2"));
        issues.push(Issue::warning(IssueCode::MissingArtifact, "w"));
        let res = result_of(issues);
        assert!(!res.is_compliant());
        assert_eq!(res.error_count(), 2);
        assert_eq!(res.metadata().total_issues, 3);
    }

    #[test]
    fn test_issue_serializes_every_field() {
        let issue = Issue::error(IssueCode::InvalidUuid, "bad")
            .at("system-security-plan.uuid")
            .for_baseline(Baseline::High)
            .with_context("value", "nope");
        let v = serde_json::to_value(&issue).unwrap();
        assert_eq!(v["code"], "FEDRAMP_INVALID_UUID");
        assert_eq!(v["severity"], "error");
        assert_eq!(v["baseline"], "high");
        assert_eq!(v["context"]["value"], "nope");
        assert!(v.get("requirement").unwrap().is_null());
        assert!(v.get("suggested_fix").unwrap().is_null());
        let back: Issue = serde_json::from_value(v).unwrap();
        assert_eq!(back, issue);
    }

    #[test]
    fn test_issue_codes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for code in IssueCode::ALL {
            assert!(code.as_str().starts_with("FEDRAMP_"));
            assert!(seen.insert(code.as_str()), "{code}");
        }
    }
}
