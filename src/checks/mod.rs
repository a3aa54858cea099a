//! FedRAMP rule checkers.
//!
//! Every checker is a plain function from the document tree and baseline to
//! a list of findings. They share no state and never short-circuit each
//! other; the validator runs them in `CHECKS` order and concatenates their
//! output. A checker that meets a value it cannot interpret returns a
//! `CheckError` instead of a partial list.

pub mod artifacts;
pub mod boundary;
pub mod components;
pub mod controls;
pub mod data_flow;
pub mod metadata;
pub mod roles;
pub mod structure;

use crate::error::CheckError;
use crate::models::{Baseline, BaselineRequirements, Issue};
use crate::tree::{get_path, Node};
use serde_json::Value as Json;

/// Root key of an OSCAL System Security Plan.
pub const SSP_ROOT: &str = "system-security-plan";

/// Inputs shared by all checkers for one validation run.
pub struct CheckContext<'a> {
    pub document: &'a Json,
    pub baseline: Baseline,
    pub requirements: &'a BaselineRequirements,
}

impl<'a> CheckContext<'a> {
    pub fn new(
        document: &'a Json,
        baseline: Baseline,
        requirements: &'a BaselineRequirements,
    ) -> Self {
        Self {
            document,
            baseline,
            requirements,
        }
    }

    /// The `system-security-plan` object; absent if the document lacks it.
    pub fn ssp(&self) -> Node<'a> {
        Node::new(get_path(self.document, SSP_ROOT), SSP_ROOT)
    }
}

pub type CheckFn = fn(&CheckContext<'_>) -> Result<Vec<Issue>, CheckError>;

/// Entry in the static check table.
pub struct CheckDefinition {
    pub id: &'static str,
    pub description: &'static str,
    pub run: CheckFn,
}

/// All checkers, in execution (and therefore report) order.
pub static CHECKS: &[CheckDefinition] = &[
    CheckDefinition {
        id: "structure",
        description: "Required top-level SSP sections and UUID format",
        run: structure::check,
    },
    CheckDefinition {
        id: "system-metadata",
        description: "System name, identifier, version and last-modified",
        run: metadata::check,
    },
    CheckDefinition {
        id: "control-implementation",
        description: "Implemented requirements against the baseline control set",
        run: controls::check,
    },
    CheckDefinition {
        id: "responsible-roles",
        description: "Required FedRAMP roles and their assigned parties",
        run: roles::check,
    },
    CheckDefinition {
        id: "components",
        description: "System components and their identifying fields",
        run: components::check,
    },
    CheckDefinition {
        id: "authorization-boundary",
        description: "Authorization boundary and network architecture",
        run: boundary::check,
    },
    CheckDefinition {
        id: "data-flow",
        description: "Data flow documentation for moderate and high baselines",
        run: data_flow::check,
    },
    CheckDefinition {
        id: "required-artifacts",
        description: "Baseline artifacts referenced from back-matter",
        run: artifacts::check,
    },
];

/// Character count after trimming surrounding whitespace.
pub(crate) fn trimmed_len(s: &str) -> usize {
    s.trim().chars().count()
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! A well-formed SSP used as the starting point for negative tests.

    use serde_json::{json, Value as Json};

    pub const SSP_UUID: &str = "9c3f5a1e-2b7d-4e8a-9f01-23456789abcd";

    pub fn complete_ssp(controls: &[&str]) -> Json {
        let implemented: Vec<Json> = controls
            .iter()
            .map(|id| {
                json!({
                    "uuid": "11111111-2222-4333-8444-555555555555",
                    "control-id": id,
                    "statements": [{"statement-id": format!("{id}_smt"), "uuid": "11111111-2222-4333-8444-666666666666"}],
                    "responsible-roles": [{"role-id": "system-owner"}]
                })
            })
            .collect();
        json!({
            "system-security-plan": {
                "uuid": SSP_UUID,
                "metadata": {
                    "title": "Acme Cloud Platform",
                    "version": "1.0",
                    "last-modified": "2024-01-15T00:00:00Z",
                    "oscal-version": "1.1.3",
                    "roles": [
                        {"id": "system-owner", "title": "System Owner"},
                        {"id": "authorizing-official", "title": "Authorizing Official"},
                        {"id": "system-administrator", "title": "System Administrator"},
                        {"id": "information-system-security-manager", "title": "ISSM"},
                        {"id": "control-assessor", "title": "Control Assessor"}
                    ],
                    "responsible-parties": [
                        {"role-id": "system-owner", "party-uuids": ["aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee"]}
                    ]
                },
                "system-characteristics": {
                    "system-id": "F1234567890",
                    "system-name": "Acme",
                    "authorization-boundary": {
                        "description": "The boundary covers all production workloads, managed databases and the admin VPN."
                    },
                    "network-architecture": {"description": "Three-tier VPC layout."},
                    "data-flow": {"description": "Customer data flows through the API tier into storage."}
                },
                "system-implementation": {
                    "components": [
                        {"uuid": "12345678-1234-4234-8234-123456789012", "type": "software", "title": "API Gateway"}
                    ]
                },
                "control-implementation": {
                    "description": "Controls",
                    "implemented-requirements": implemented
                },
                "back-matter": {
                    "resources": [
                        {"title": "Acme System-Security-Plan attachment"},
                        {"title": "Rules-of-Behavior"},
                        {"title": "PIA", "props": [{"name": "document-type", "value": "Privacy-Impact-Assessment"}]},
                        {"title": "Contingency-Plan v2"},
                        {"title": "Configuration-Management-Plan"},
                        {"title": "Incident-Response-Plan"},
                        {"title": "System-Security-Architecture"},
                        {"title": "Penetration-Test-Results 2024"}
                    ]
                }
            }
        })
    }

    /// Remove the dotted path under `system-security-plan`.
    pub fn without(mut doc: Json, path: &str) -> Json {
        let mut segs: Vec<&str> = path.split('.').collect();
        let last = segs.pop().unwrap();
        let mut cur = doc.get_mut("system-security-plan").unwrap();
        for seg in segs {
            cur = cur.get_mut(seg).unwrap();
        }
        cur.as_object_mut().unwrap().remove(last);
        doc
    }

    /// Replace the value at the dotted path under `system-security-plan`.
    pub fn with(mut doc: Json, path: &str, value: Json) -> Json {
        let mut cur = doc.get_mut("system-security-plan").unwrap();
        for seg in path.split('.') {
            cur = cur
                .as_object_mut()
                .unwrap()
                .entry(seg.to_string())
                .or_insert(Json::Null);
        }
        *cur = value;
        doc
    }
}
