//! Validation orchestrator.
//!
//! Runs every checker in `CHECKS` order against one document and assembles a
//! `ValidationResult`. A failing checker contributes a single
//! `FEDRAMP_VALIDATION_ERROR` issue and the run continues, so callers always
//! get a result back.

use crate::checks::{CheckContext, CheckDefinition, CHECKS};
use crate::error::CheckError;
use crate::models::{Baseline, DocumentType, Issue, IssueCode, ValidationResult};
use crate::registry::BaselineRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Outcome for documents that are not System Security Plans.
pub enum UnsupportedPolicy {
    /// Compliant result with an informational note.
    #[default]
    Pass,
    /// Non-compliant result; the same note is raised as an error.
    Fail,
}

#[derive(Debug, Clone, Default)]
pub struct ValidatorOptions {
    pub unsupported_documents: UnsupportedPolicy,
}

/// FedRAMP constraint validator. Cheap to clone and safe to share across
/// threads; each call works only on its own input.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<BaselineRegistry>,
    options: ValidatorOptions,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Arc::new(BaselineRegistry::builtin()))
    }
}

impl Validator {
    pub fn new(registry: Arc<BaselineRegistry>) -> Self {
        Self {
            registry,
            options: ValidatorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &BaselineRegistry {
        &self.registry
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate a decoded SSP tree against `baseline`.
    pub fn validate(&self, document: &Json, baseline: Baseline) -> ValidationResult {
        self.validate_since(document, baseline, Utc::now(), Instant::now())
    }

    /// As `validate`, but timed from a run that started earlier (e.g. before
    /// the document was read and decoded).
    pub(crate) fn validate_since(
        &self,
        document: &Json,
        baseline: Baseline,
        started_at: DateTime<Utc>,
        clock: Instant,
    ) -> ValidationResult {
        info!(%baseline, document_type = "system-security-plan", "starting FedRAMP SSP validation");

        let requirements = self.registry.requirements_for(baseline);
        let ctx = CheckContext::new(document, baseline, requirements);
        let mut issues = Vec::new();
        for def in CHECKS {
            match (def.run)(&ctx) {
                Ok(found) => {
                    debug!(check = def.id, issues = found.len(), "check finished");
                    issues.extend(found);
                }
                Err(err) => {
                    error!(check = def.id, error = %err, "FedRAMP check failed");
                    issues.push(check_failure(def, &err));
                }
            }
        }

        let result = ValidationResult::assemble(
            baseline,
            DocumentType::SystemSecurityPlan,
            issues,
            started_at,
            clock.elapsed(),
            None,
        );
        info!(
            %baseline,
            compliant = result.is_compliant(),
            errors = result.error_count(),
            warnings = result.warning_count(),
            elapsed_ms = result.validation_time_ms(),
            "FedRAMP SSP validation finished"
        );
        result
    }
}

fn check_failure(def: &CheckDefinition, err: &CheckError) -> Issue {
    Issue::error(
        IssueCode::ValidationError,
        format!("Validation process failed in {} check: {err}", def.id),
    )
    .at(err.path())
    .with_context("check", def.id)
    .with_context("error_kind", err.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::fixtures::{complete_ssp, with, without};
    use crate::models::{BaselineRequirements, Severity};
    use serde_json::json;

    fn small_registry() -> Arc<BaselineRegistry> {
        let three = BaselineRequirements {
            required_controls: vec!["ac-1".into(), "ac-2".into(), "ac-3".into()],
            min_controls: 3,
            required_metadata: Vec::new(),
            required_artifacts: Vec::new(),
        };
        Arc::new(BaselineRegistry::from_parts(three.clone(), three.clone(), three))
    }

    fn codes(result: &ValidationResult) -> Vec<IssueCode> {
        result.issues().iter().map(|i| i.code).collect()
    }

    #[test]
    fn test_complete_document_is_compliant() {
        let validator = Validator::new(small_registry());
        let result = validator.validate(&complete_ssp(&["ac-1", "ac-2", "ac-3"]), Baseline::High);
        assert!(result.is_compliant(), "{:?}", result.issues());
        assert!(result.issues().is_empty());
        assert_eq!(result.document_type(), DocumentType::SystemSecurityPlan);
        assert_eq!(result.baseline(), Baseline::High);
    }

    #[test]
    fn test_control_coverage_additivity() {
        let validator = Validator::new(small_registry());
        let result = validator.validate(&complete_ssp(&[]), Baseline::Low);
        assert_eq!(result.issues_with(IssueCode::MissingRequiredControl).count(), 3);
        assert_eq!(result.issues_with(IssueCode::InsufficientControls).count(), 1);
        assert_eq!(result.error_count(), 4);
        assert!(!result.is_compliant());
    }

    #[test]
    fn test_data_flow_by_baseline() {
        let validator = Validator::new(small_registry());
        let doc = without(
            complete_ssp(&["ac-1", "ac-2", "ac-3"]),
            "system-characteristics.data-flow",
        );
        let low = validator.validate(&doc, Baseline::Low);
        assert_eq!(low.issues_with(IssueCode::MissingDataFlow).count(), 0);
        assert!(low.is_compliant());

        let moderate = validator.validate(&doc, Baseline::Moderate);
        let found: Vec<_> = moderate.issues_with(IssueCode::MissingDataFlow).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Warning);
        assert!(moderate.is_compliant());

        let high = validator.validate(&doc, Baseline::High);
        let found: Vec<_> = high.issues_with(IssueCode::MissingDataFlow).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Error);
        assert!(!high.is_compliant());
    }

    #[test]
    fn test_empty_components_only_short_circuit_error() {
        let validator = Validator::new(small_registry());
        let doc = with(
            complete_ssp(&["ac-1", "ac-2", "ac-3"]),
            "system-implementation.components",
            json!([]),
        );
        let result = validator.validate(&doc, Baseline::Moderate);
        assert_eq!(codes(&result), vec![IssueCode::NoComponents]);
    }

    #[test]
    fn test_minimal_document_end_to_end() {
        let validator = Validator::default();
        let doc = json!({"system-security-plan": {"metadata": {"title": "X"}}});
        let result = validator.validate(&doc, Baseline::Moderate);
        assert!(!result.is_compliant());

        let structural: Vec<_> = result
            .issues_with(IssueCode::MissingElement)
            .filter_map(|i| i.location.as_deref())
            .collect();
        assert_eq!(
            structural,
            vec![
                "system-security-plan.uuid",
                "system-security-plan.system-characteristics",
                "system-security-plan.system-implementation",
                "system-security-plan.control-implementation",
            ]
        );
        for code in [
            IssueCode::MissingSystemName,
            IssueCode::MissingSystemId,
            IssueCode::InsufficientControls,
            IssueCode::MissingRole,
            IssueCode::NoComponents,
            IssueCode::MissingAuthBoundary,
            IssueCode::MissingDataFlow,
        ] {
            assert!(result.issues_with(code).count() > 0, "expected {code}");
        }
        assert_eq!(result.issues_with(IssueCode::MissingRequiredControl).count(), 160);
        assert_eq!(result.issues_with(IssueCode::MissingRole).count(), 5);
        assert_eq!(result.metadata().total_issues, result.issues().len());
    }

    #[test]
    fn test_issue_order_follows_check_order() {
        let validator = Validator::default();
        let doc = json!({"system-security-plan": {"metadata": {"title": "X"}}});
        let result = validator.validate(&doc, Baseline::High);
        let first_of = |code| {
            result
                .issues()
                .iter()
                .position(|i| i.code == code)
                .unwrap()
        };
        assert!(first_of(IssueCode::MissingElement) < first_of(IssueCode::MissingSystemName));
        assert!(first_of(IssueCode::MissingSystemName) < first_of(IssueCode::InsufficientControls));
        assert!(first_of(IssueCode::InsufficientControls) < first_of(IssueCode::MissingRole));
        assert!(first_of(IssueCode::MissingRole) < first_of(IssueCode::NoComponents));
        assert!(first_of(IssueCode::NoComponents) < first_of(IssueCode::MissingAuthBoundary));
        assert!(first_of(IssueCode::MissingAuthBoundary) < first_of(IssueCode::MissingDataFlow));
        assert!(first_of(IssueCode::MissingDataFlow) < first_of(IssueCode::MissingArtifact));
    }

    #[test]
    fn test_validation_is_deterministic() {
        let validator = Validator::default();
        let doc = without(complete_ssp(&["ac-2", "si-4"]), "uuid");
        let first = validator.validate(&doc, Baseline::Moderate);
        let second = validator.validate(&doc, Baseline::Moderate);
        assert_eq!(first.issues(), second.issues());
    }

    #[test]
    fn test_malformed_section_becomes_validation_error_and_run_continues() {
        let validator = Validator::new(small_registry());
        let doc = with(
            complete_ssp(&["ac-1", "ac-2", "ac-3"]),
            "metadata",
            json!("not an object"),
        );
        let result = validator.validate(&doc, Baseline::Moderate);
        let failures: Vec<_> = result.issues_with(IssueCode::ValidationError).collect();
        // metadata and roles checkers both read the metadata object
        assert_eq!(failures.len(), 2);
        let ctx = failures[0].context.as_ref().unwrap();
        assert_eq!(ctx["check"], "system-metadata");
        assert_eq!(ctx["error_kind"], "unexpected_shape");
        assert_eq!(failures[1].context.as_ref().unwrap()["check"], "responsible-roles");
        assert!(!result.is_compliant());
        // later checkers still ran and found nothing wrong with components
        assert_eq!(result.issues_with(IssueCode::NoComponents).count(), 0);
    }

    #[test]
    fn test_shared_across_threads() {
        let validator = Arc::new(Validator::new(small_registry()));
        let handles: Vec<_> = Baseline::ALL
            .into_iter()
            .map(|baseline| {
                let v = Arc::clone(&validator);
                std::thread::spawn(move || v.validate(&complete_ssp(&[]), baseline).error_count())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 4);
        }
    }
}
