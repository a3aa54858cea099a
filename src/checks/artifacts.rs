//! Baseline artifacts referenced from back-matter resources.
//!
//! Findings are always warnings: artifacts may live outside the document.

use super::CheckContext;
use crate::error::CheckError;
use crate::models::{Issue, IssueCode};

pub fn check(ctx: &CheckContext<'_>) -> Result<Vec<Issue>, CheckError> {
    let resources = ctx.ssp().field("back-matter")?.field("resources")?;

    let mut labels: Vec<String> = Vec::new();
    for resource in resources.items()? {
        if let Some(title) = resource.field("title")?.as_str()? {
            labels.push(title.to_lowercase());
        }
        for prop in resource.field("props")?.items()? {
            if prop.field("name")?.as_str()? == Some("document-type") {
                if let Some(value) = prop.field("value")?.as_str()? {
                    labels.push(value.to_lowercase());
                }
            }
        }
    }

    let issues = ctx
        .requirements
        .required_artifacts
        .iter()
        .filter(|artifact| {
            let needle = artifact.to_lowercase();
            !labels.iter().any(|label| label.contains(&needle))
        })
        .map(|artifact| {
            Issue::warning(
                IssueCode::MissingArtifact,
                format!("Required artifact '{artifact}' not found in back-matter resources"),
            )
            .at(resources.path())
            .for_baseline(ctx.baseline)
            .fix(format!("Add reference to {artifact} document in back-matter"))
        })
        .collect();
    Ok(issues)
}
