//! System identity metadata.

use super::{trimmed_len, CheckContext};
use crate::error::CheckError;
use crate::models::{Issue, IssueCode, MetadataRequirement};

const MIN_TITLE_LEN: usize = 3;

/// Applies the baseline's named metadata rules, then the always-on
/// version/last-modified warnings.
pub fn check(ctx: &CheckContext<'_>) -> Result<Vec<Issue>, CheckError> {
    let mut issues = Vec::new();
    let ssp = ctx.ssp();
    let metadata = ssp.field("metadata")?;
    let characteristics = ssp.field("system-characteristics")?;

    for requirement in &ctx.requirements.required_metadata {
        match requirement {
            MetadataRequirement::SystemName => {
                let title = metadata.field("title")?;
                if title.as_str()?.map_or(0, trimmed_len) < MIN_TITLE_LEN {
                    issues.push(
                        Issue::error(
                            IssueCode::MissingSystemName,
                            "System name (title) is required and must be at least 3 characters",
                        )
                        .at(title.path())
                        .for_baseline(ctx.baseline),
                    );
                }
            }
            MetadataRequirement::SystemId => {
                let system_id = characteristics.field("system-id")?;
                if !system_id.is_truthy() {
                    issues.push(
                        Issue::error(IssueCode::MissingSystemId, "System identifier is required")
                            .at(system_id.path())
                            .for_baseline(ctx.baseline),
                    );
                }
            }
            // Covered by the authorization-boundary checker.
            MetadataRequirement::AuthorizationBoundary => {}
            // Named by the baseline but not yet backed by a document rule.
            MetadataRequirement::DataTypes
            | MetadataRequirement::SystemCategorization
            | MetadataRequirement::HighWaterMark => {}
        }
    }

    if !metadata.has("version")? {
        issues.push(
            Issue::warning(IssueCode::MissingVersion, "Document version should be specified")
                .at(format!("{}.version", metadata.path())),
        );
    }
    if !metadata.has("last-modified")? {
        issues.push(
            Issue::warning(
                IssueCode::MissingLastModified,
                "Last modified timestamp should be specified",
            )
            .at(format!("{}.last-modified", metadata.path())),
        );
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{complete_ssp, with, without};
    use super::*;
    use crate::models::{Baseline, BaselineRequirements, Severity};
    use crate::registry::BaselineRegistry;
    use serde_json::{json, Value as Json};

    fn run(doc: &Json, reqs: &BaselineRequirements) -> Vec<Issue> {
        check(&CheckContext::new(doc, Baseline::Moderate, reqs)).unwrap()
    }

    fn builtin_moderate() -> BaselineRequirements {
        BaselineRegistry::builtin()
            .requirements_for(Baseline::Moderate)
            .clone()
    }

    #[test]
    fn test_complete_metadata_passes() {
        assert!(run(&complete_ssp(&[]), &builtin_moderate()).is_empty());
    }

    #[test]
    fn test_short_or_blank_title_is_error() {
        for title in [json!("  X "), json!("ab"), json!("   ")] {
            let doc = with(complete_ssp(&[]), "metadata.title", title);
            let issues = run(&doc, &builtin_moderate());
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].code, IssueCode::MissingSystemName);
            assert_eq!(issues[0].baseline, Some(Baseline::Moderate));
            assert_eq!(
                issues[0].location.as_deref(),
                Some("system-security-plan.metadata.title")
            );
        }
    }

    #[test]
    fn test_missing_system_id_is_error() {
        let doc = without(complete_ssp(&[]), "system-characteristics.system-id");
        let issues = run(&doc, &builtin_moderate());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::MissingSystemId);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_rules_follow_baseline_list() {
        let doc = json!({
            "system-security-plan": {"metadata": {"version": "1", "last-modified": "x"}}
        });
        // Nothing named: no identity errors even though title and id are absent.
        assert!(run(&doc, &BaselineRequirements::EMPTY).is_empty());
        let only_name = BaselineRequirements {
            required_metadata: vec![MetadataRequirement::SystemName],
            ..BaselineRequirements::default()
        };
        let issues = run(&doc, &only_name);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::MissingSystemName);
    }

    #[test]
    fn test_version_and_last_modified_are_warnings_only() {
        let doc = without(without(complete_ssp(&[]), "metadata.version"), "metadata.last-modified");
        let issues = run(&doc, &BaselineRequirements::EMPTY);
        let codes: Vec<_> = issues.iter().map(|i| i.code).collect();
        assert_eq!(codes, vec![IssueCode::MissingVersion, IssueCode::MissingLastModified]);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_non_string_title_is_shape_error() {
        let doc = with(complete_ssp(&[]), "metadata.title", json!(7));
        let reqs = builtin_moderate();
        let err = check(&CheckContext::new(&doc, Baseline::Moderate, &reqs)).unwrap_err();
        assert_eq!(err.path(), "system-security-plan.metadata.title");
    }
}
