//! FedRAMP constraint validation for OSCAL documents.
//!
//! This crate validates OSCAL System Security Plans against the FedRAMP
//! Low, Moderate, and High baselines and reports structured findings.
//!
//! High-level modules:
//! - `validator`: Orchestrator running the rule chain over one document.
//! - `checks`: The individual FedRAMP rule checkers and their order.
//! - `loader`: File/byte decoding and routing by document type.
//! - `registry`: Baseline requirement tables (built-in or loaded).
//! - `models`: Issues, results, baselines, and document types.
//! - `tree`: Path-tracking safe navigation over decoded documents.
//! - `error`: Error types for access, checks, loading, and config.
//! - `config`: Discovery and effective configuration resolution.
//! - `batch`: Glob expansion and parallel multi-file validation.
//! - `output`: Human/JSON printers.
//! - `cli`: CLI argument parsing (binary uses this).
pub mod batch;
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod output;
pub mod registry;
pub mod tree;
pub mod validator;

pub use models::{Baseline, DocumentType, Issue, IssueCode, Severity, ValidationResult};
pub use registry::BaselineRegistry;
pub use validator::{UnsupportedPolicy, Validator, ValidatorOptions};
