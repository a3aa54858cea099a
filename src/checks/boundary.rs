//! Authorization boundary and network architecture.

use super::{trimmed_len, CheckContext};
use crate::error::CheckError;
use crate::models::{Issue, IssueCode};

const MIN_DESCRIPTION_LEN: usize = 50;

pub fn check(ctx: &CheckContext<'_>) -> Result<Vec<Issue>, CheckError> {
    let mut issues = Vec::new();
    let characteristics = ctx.ssp().field("system-characteristics")?;

    let boundary = characteristics.field("authorization-boundary")?;
    if !boundary.is_truthy() {
        issues.push(
            Issue::error(
                IssueCode::MissingAuthBoundary,
                "Authorization boundary description is required",
            )
            .at(boundary.path())
            .requirement("FedRAMP Authorization Boundary Requirements"),
        );
    } else {
        let description = boundary.field("description")?;
        if description.as_str()?.map_or(0, trimmed_len) < MIN_DESCRIPTION_LEN {
            issues.push(
                Issue::warning(
                    IssueCode::InsufficientAuthBoundary,
                    "Authorization boundary description should be more detailed (min 50 characters)",
                )
                .at(description.path()),
            );
        }
    }

    let network = characteristics.field("network-architecture")?;
    if !network.is_truthy() {
        issues.push(
            Issue::warning(
                IssueCode::MissingNetworkArch,
                "Network architecture documentation is recommended",
            )
            .at(network.path()),
        );
    }

    Ok(issues)
}
