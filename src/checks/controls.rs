//! Control implementation coverage against the baseline.

use super::CheckContext;
use crate::error::CheckError;
use crate::models::{Issue, IssueCode};
use std::collections::HashSet;

/// Per-requirement statement/role checks, then one error per required
/// control that is not implemented, plus a single insufficient-count error
/// when the distinct implemented set is below the baseline floor.
pub fn check(ctx: &CheckContext<'_>) -> Result<Vec<Issue>, CheckError> {
    let mut issues = Vec::new();
    let requirements = ctx
        .ssp()
        .field("control-implementation")?
        .field("implemented-requirements")?;

    let mut implemented: HashSet<String> = HashSet::new();
    for req in requirements.items()? {
        let control_id = req
            .field("control-id")?
            .as_str()?
            .unwrap_or_default()
            .to_lowercase();
        if control_id.is_empty() {
            continue;
        }
        let location = format!("{}[control-id='{}']", requirements.path(), control_id);
        let display = control_id.to_uppercase();

        if req.field("statements")?.items()?.is_empty() {
            issues.push(
                Issue::error(
                    IssueCode::MissingControlStatements,
                    format!("Control {display} is missing implementation statements"),
                )
                .at(format!("{location}.statements"))
                .for_baseline(ctx.baseline),
            );
        }
        if req.field("responsible-roles")?.items()?.is_empty() {
            issues.push(
                Issue::warning(
                    IssueCode::MissingResponsibleRoles,
                    format!("Control {display} should specify responsible roles"),
                )
                .at(format!("{location}.responsible-roles"))
                .for_baseline(ctx.baseline),
            );
        }
        implemented.insert(control_id);
    }

    let citation = format!("FedRAMP {} Baseline", ctx.baseline.title());
    for control in &ctx.requirements.required_controls {
        if implemented.contains(control) {
            continue;
        }
        let display = control.to_uppercase();
        issues.push(
            Issue::error(
                IssueCode::MissingRequiredControl,
                format!("Required control {display} is not implemented"),
            )
            .at(requirements.path())
            .requirement(citation.as_str())
            .for_baseline(ctx.baseline)
            .fix(format!("Add implementation for control {display}")),
        );
    }

    let min = ctx.requirements.min_controls;
    if implemented.len() < min {
        issues.push(
            Issue::error(
                IssueCode::InsufficientControls,
                format!(
                    "Insufficient controls implemented. Expected at least {min}, found {}",
                    implemented.len()
                ),
            )
            .at(requirements.path())
            .requirement(citation)
            .for_baseline(ctx.baseline)
            .with_context("expected", min)
            .with_context("actual", implemented.len()),
        );
    }

    Ok(issues)
}
