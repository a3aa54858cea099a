//! Document loading and type routing.
//!
//! Reads and decodes a source, determines the OSCAL model (explicitly or by
//! detection) and sends System Security Plans through the full rule chain.
//! Other models get a placeholder result governed by `UnsupportedPolicy`.
//! Load failures become a non-compliant result, never an `Err`.

use crate::error::LoadError;
use crate::models::{Baseline, DocumentType, Issue, IssueCode, Severity, ValidationResult};
use crate::validator::{UnsupportedPolicy, Validator};
use chrono::{DateTime, Utc};
use serde_json::Value as Json;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Wire format of a source document.
pub enum SourceFormat {
    Json,
    Xml,
}

impl SourceFormat {
    /// Format implied by the file extension, if it names one.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(SourceFormat::Json),
            "xml" => Some(SourceFormat::Xml),
            _ => None,
        }
    }

    /// Content sniffing: a leading `<` means XML, anything else is tried as
    /// JSON.
    pub fn sniff(data: &[u8]) -> Self {
        match data.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'<') => SourceFormat::Xml,
            _ => SourceFormat::Json,
        }
    }
}

/// Decode `data` into a document tree. XML is rejected outright rather than
/// being fed to the JSON decoder.
pub fn decode(data: &[u8], format: SourceFormat) -> Result<Json, LoadError> {
    match format {
        SourceFormat::Xml => Err(LoadError::XmlNotSupported),
        SourceFormat::Json => Ok(serde_json::from_slice(data)?),
    }
}

/// Read and decode the document at `path`.
pub fn load_document(path: &Path) -> Result<Json, LoadError> {
    let hinted = SourceFormat::from_path(path);
    if hinted == Some(SourceFormat::Xml) {
        return Err(LoadError::XmlNotSupported);
    }
    let data = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&data, hinted.unwrap_or_else(|| SourceFormat::sniff(&data)))
}

struct RunClock {
    started_at: DateTime<Utc>,
    clock: Instant,
}

impl RunClock {
    fn start() -> Self {
        Self {
            started_at: Utc::now(),
            clock: Instant::now(),
        }
    }
}

impl Validator {
    /// Load, route and validate the document at `path`.
    pub fn validate_file(
        &self,
        path: &Path,
        baseline: Baseline,
        document_type: Option<DocumentType>,
    ) -> ValidationResult {
        let run = RunClock::start();
        match load_document(path) {
            Ok(document) => self.route(&document, baseline, document_type, run),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "FedRAMP validation failed");
                load_failure(err, baseline, document_type, Some(path), run)
            }
        }
    }

    /// Decode in-memory `data` and validate it. Without a `format` hint the
    /// content is sniffed.
    pub fn validate_bytes(
        &self,
        data: &[u8],
        format: Option<SourceFormat>,
        baseline: Baseline,
        document_type: Option<DocumentType>,
    ) -> ValidationResult {
        let run = RunClock::start();
        let format = format.unwrap_or_else(|| SourceFormat::sniff(data));
        match decode(data, format) {
            Ok(document) => self.route(&document, baseline, document_type, run),
            Err(err) => {
                warn!(error = %err, "FedRAMP validation failed");
                load_failure(err, baseline, document_type, None, run)
            }
        }
    }

    /// Route an already-decoded tree by its (given or detected) type.
    pub fn validate_document(
        &self,
        document: &Json,
        baseline: Baseline,
        document_type: Option<DocumentType>,
    ) -> ValidationResult {
        self.route(document, baseline, document_type, RunClock::start())
    }

    fn route(
        &self,
        document: &Json,
        baseline: Baseline,
        document_type: Option<DocumentType>,
        run: RunClock,
    ) -> ValidationResult {
        let document_type = document_type.unwrap_or_else(|| DocumentType::detect(document));
        if document_type == DocumentType::SystemSecurityPlan {
            return self.validate_since(document, baseline, run.started_at, run.clock);
        }

        info!(%document_type, %baseline, "no FedRAMP rules for document type");
        let message =
            format!("FedRAMP validation not yet implemented for {document_type} documents");
        let (severity, note) = match self.options().unsupported_documents {
            UnsupportedPolicy::Pass => {
                (Severity::Info, Some("Basic validation passed".to_string()))
            }
            UnsupportedPolicy::Fail => (Severity::Error, None),
        };
        let issue = Issue::new(severity, IssueCode::UnsupportedDocument, message)
            .with_context("document_type", document_type.as_str());
        ValidationResult::assemble(
            baseline,
            document_type,
            vec![issue],
            run.started_at,
            run.clock.elapsed(),
            note,
        )
    }
}

fn load_failure(
    err: LoadError,
    baseline: Baseline,
    document_type: Option<DocumentType>,
    source: Option<&Path>,
    run: RunClock,
) -> ValidationResult {
    let mut issue = Issue::error(
        IssueCode::ValidationFailed,
        format!("FedRAMP validation failed: {err}"),
    )
    .with_context("error_kind", err.kind())
    .with_context("detail", err.to_string());
    if let Some(path) = source {
        issue = issue.with_context("source", path.display().to_string());
    }
    ValidationResult::assemble(
        baseline,
        document_type.unwrap_or(DocumentType::Unknown),
        vec![issue],
        run.started_at,
        run.clock.elapsed(),
        None,
    )
}
