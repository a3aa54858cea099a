//! Required SSP sections and UUID format.

use super::{CheckContext, SSP_ROOT};
use crate::error::CheckError;
use crate::models::{Issue, IssueCode};
use regex::Regex;
use std::sync::LazyLock;

const REQUIRED_SECTIONS: [&str; 5] = [
    "uuid",
    "metadata",
    "system-characteristics",
    "system-implementation",
    "control-implementation",
];

const REQUIREMENT: &str = "FedRAMP SSP Template Requirements";

static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("uuid pattern compiles")
});

fn missing(element: &str, location: String) -> Issue {
    Issue::error(
        IssueCode::MissingElement,
        format!("Required element '{element}' is missing from SSP"),
    )
    .at(location)
    .requirement(REQUIREMENT)
}

/// One `FEDRAMP_MISSING_ELEMENT` per absent (or `null`) section;
/// `FEDRAMP_INVALID_UUID` only when a `uuid` value exists but is not a
/// canonical lowercase UUID.
pub fn check(ctx: &CheckContext<'_>) -> Result<Vec<Issue>, CheckError> {
    let mut issues = Vec::new();
    let ssp = ctx.ssp();

    if !ssp.is_present() {
        issues.push(missing(SSP_ROOT, SSP_ROOT.to_string()));
    }
    for section in REQUIRED_SECTIONS {
        if !ssp.field(section)?.is_present() {
            issues.push(missing(section, format!("{SSP_ROOT}.{section}")));
        }
    }

    let uuid = ssp.field("uuid")?;
    if uuid.is_present() {
        let raw = uuid.value().and_then(|v| v.as_str());
        if !raw.is_some_and(|s| UUID_PATTERN.is_match(s)) {
            issues.push(
                Issue::error(IssueCode::InvalidUuid, "SSP UUID format is invalid")
                    .at(uuid.path())
                    .requirement(REQUIREMENT)
                    .fix("Ensure UUID follows RFC 4122 format")
                    .with_context("value", uuid.value().cloned().unwrap_or_default()),
            );
        }
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{complete_ssp, with, without};
    use super::*;
    use crate::models::{Baseline, BaselineRequirements};
    use serde_json::{json, Value as Json};

    fn run(doc: &Json) -> Vec<Issue> {
        let reqs = BaselineRequirements::EMPTY;
        check(&CheckContext::new(doc, Baseline::Moderate, &reqs)).unwrap()
    }

    fn codes_at(issues: &[Issue], code: IssueCode) -> Vec<String> {
        issues
            .iter()
            .filter(|i| i.code == code)
            .filter_map(|i| i.location.clone())
            .collect()
    }

    #[test]
    fn test_complete_document_passes() {
        assert!(run(&complete_ssp(&["ac-1"])).is_empty());
    }

    #[test]
    fn test_each_missing_section_reported_with_location() {
        let doc = json!({"system-security-plan": {"metadata": {"title": "X"}}});
        let issues = run(&doc);
        assert_eq!(
            codes_at(&issues, IssueCode::MissingElement),
            vec![
                "system-security-plan.uuid",
                "system-security-plan.system-characteristics",
                "system-security-plan.system-implementation",
                "system-security-plan.control-implementation",
            ]
        );
        assert!(issues.iter().all(|i| i.is_error()));
    }

    #[test]
    fn test_missing_root_reports_root_and_all_sections() {
        let issues = run(&json!({"catalog": {}}));
        let locs = codes_at(&issues, IssueCode::MissingElement);
        assert_eq!(locs.len(), 6);
        assert_eq!(locs[0], "system-security-plan");
    }

    #[test]
    fn test_missing_uuid_is_never_invalid_uuid() {
        let issues = run(&without(complete_ssp(&[]), "uuid"));
        assert_eq!(
            codes_at(&issues, IssueCode::MissingElement),
            vec!["system-security-plan.uuid"]
        );
        assert!(!issues.iter().any(|i| i.code == IssueCode::InvalidUuid));
    }

    #[test]
    fn test_malformed_uuid_is_never_missing_element() {
        let issues = run(&with(complete_ssp(&[]), "uuid", json!("not-a-uuid")));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::InvalidUuid);
        assert_eq!(issues[0].location.as_deref(), Some("system-security-plan.uuid"));
    }

    #[test]
    fn test_uppercase_or_non_string_uuid_is_invalid() {
        let upper = with(
            complete_ssp(&[]),
            "uuid",
            json!("9C3F5A1E-2B7D-4E8A-9F01-23456789ABCD"),
        );
        assert_eq!(run(&upper)[0].code, IssueCode::InvalidUuid);
        let numeric = with(complete_ssp(&[]), "uuid", json!(42));
        assert_eq!(run(&numeric)[0].code, IssueCode::InvalidUuid);
    }

    #[test]
    fn test_null_sections_are_missing_elements() {
        let doc = with(
            with(complete_ssp(&[]), "metadata", Json::Null),
            "uuid",
            Json::Null,
        );
        let issues = run(&doc);
        assert_eq!(
            codes_at(&issues, IssueCode::MissingElement),
            vec!["system-security-plan.uuid", "system-security-plan.metadata"]
        );
        assert!(!issues.iter().any(|i| i.code == IssueCode::InvalidUuid));
    }

    #[test]
    fn test_non_object_root_is_a_shape_error() {
        let doc = json!({"system-security-plan": ["not", "an", "object"]});
        let reqs = BaselineRequirements::EMPTY;
        let err = check(&CheckContext::new(&doc, Baseline::Low, &reqs)).unwrap_err();
        assert_eq!(err.kind(), "unexpected_shape");
        assert_eq!(err.path(), "system-security-plan");
    }
}
