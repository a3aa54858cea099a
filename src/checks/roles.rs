//! Required FedRAMP roles and responsible-party assignment.

use super::CheckContext;
use crate::error::CheckError;
use crate::models::{Issue, IssueCode};
use std::collections::HashSet;

pub const REQUIRED_ROLES: [&str; 5] = [
    "system-owner",
    "authorizing-official",
    "system-administrator",
    "information-system-security-manager",
    "control-assessor",
];

pub fn check(ctx: &CheckContext<'_>) -> Result<Vec<Issue>, CheckError> {
    let mut issues = Vec::new();
    let metadata = ctx.ssp().field("metadata")?;
    let roles = metadata.field("roles")?;

    let mut defined: HashSet<&str> = HashSet::new();
    for role in roles.items()? {
        if let Some(id) = role.field("id")?.as_str()? {
            defined.insert(id);
        }
    }
    for required in REQUIRED_ROLES {
        if !defined.contains(required) {
            issues.push(
                Issue::error(
                    IssueCode::MissingRole,
                    format!("Required role '{required}' is not defined"),
                )
                .at(roles.path())
                .requirement("FedRAMP Required Roles")
                .with_context("role_id", required),
            );
        }
    }

    let parties = metadata.field("responsible-parties")?;
    for party in parties.items()? {
        if party.field("party-uuids")?.items()?.is_empty() {
            let role_id = party.field("role-id")?.as_str()?.unwrap_or("unspecified");
            issues.push(
                Issue::warning(
                    IssueCode::RoleWithoutParty,
                    format!("Role '{role_id}' has no assigned parties"),
                )
                .at(parties.path()),
            );
        }
    }

    Ok(issues)
}
