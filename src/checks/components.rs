//! System components.

use super::{trimmed_len, CheckContext};
use crate::error::CheckError;
use crate::models::{Issue, IssueCode};

const MIN_TITLE_LEN: usize = 3;

/// An empty component list is a single error and stops further checks;
/// otherwise each component may contribute up to three errors.
pub fn check(ctx: &CheckContext<'_>) -> Result<Vec<Issue>, CheckError> {
    let components = ctx
        .ssp()
        .field("system-implementation")?
        .field("components")?;
    let items = components.items()?;
    if items.is_empty() {
        return Ok(vec![Issue::error(
            IssueCode::NoComponents,
            "System must define at least one component",
        )
        .at(components.path())
        .requirement("FedRAMP System Documentation Requirements")]);
    }

    let mut issues = Vec::new();
    for (idx, component) in items.iter().enumerate() {
        let uuid = component.field("uuid")?;
        let kind = component.field("type")?;
        let title_node = component.field("title")?;
        let title = title_node.as_str()?.unwrap_or_default();

        if !uuid.is_truthy() {
            issues.push(
                Issue::error(
                    IssueCode::ComponentMissingUuid,
                    format!("Component at index {idx} is missing UUID"),
                )
                .at(uuid.path()),
            );
        }
        if !kind.is_truthy() {
            issues.push(
                Issue::error(
                    IssueCode::ComponentMissingType,
                    format!("Component '{title}' is missing type specification"),
                )
                .at(kind.path()),
            );
        }
        if trimmed_len(title) < MIN_TITLE_LEN {
            issues.push(
                Issue::error(
                    IssueCode::ComponentMissingTitle,
                    format!("Component at index {idx} needs a descriptive title (min 3 characters)"),
                )
                .at(title_node.path()),
            );
        }
    }
    Ok(issues)
}
