//! Batch validation over files matched by glob patterns.
//!
//! Patterns are expanded with `glob`, documents are validated in parallel
//! with `rayon`, and reports come back sorted by display path so output is
//! stable regardless of scheduling.

use crate::models::{Baseline, DocumentType, ValidationResult};
use crate::validator::Validator;
use glob::glob;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize)]
/// One validated file. `file` is relative to the config root when possible.
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Totals across a batch.
pub struct BatchSummary {
    pub files: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl BatchSummary {
    pub fn of(reports: &[FileReport]) -> Self {
        let mut s = BatchSummary {
            files: reports.len(),
            ..Default::default()
        };
        for r in reports {
            if r.result.is_compliant() {
                s.compliant += 1;
            } else {
                s.non_compliant += 1;
            }
            let meta = r.result.metadata();
            s.errors += meta.error_count;
            s.warnings += meta.warning_count;
            s.infos += meta.info_count;
        }
        s
    }
}

#[derive(Debug, Clone, Default)]
/// Files matched by a set of patterns, plus the patterns that matched nothing.
pub struct Targets {
    pub files: Vec<PathBuf>,
    pub unmatched: Vec<String>,
}

/// Expand glob patterns into a deduplicated, sorted list of regular files.
///
/// A pattern naming an existing file literally is accepted as-is, so paths
/// containing glob metacharacters still work.
pub fn expand_patterns(patterns: &[String]) -> Targets {
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    let mut unmatched = Vec::new();
    for pat in patterns {
        let literal = Path::new(pat);
        if literal.is_file() {
            files.insert(literal.to_path_buf());
            continue;
        }
        let mut hit = false;
        match glob(pat) {
            Ok(paths) => {
                for entry in paths.flatten() {
                    if entry.is_file() {
                        files.insert(entry);
                        hit = true;
                    }
                }
            }
            Err(e) => warn!(pattern = %pat, error = %e, "invalid glob pattern"),
        }
        if !hit {
            unmatched.push(pat.clone());
        }
    }
    debug!(files = files.len(), unmatched = unmatched.len(), "expanded patterns");
    Targets {
        files: files.into_iter().collect(),
        unmatched,
    }
}

/// Path shown to users: relative to `root` when the file lives under it.
pub fn display_path(path: &Path, root: &Path) -> String {
    let abs_root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let abs_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    match pathdiff::diff_paths(&abs_path, &abs_root) {
        Some(rel) if !rel.starts_with("..") => rel.to_string_lossy().to_string(),
        _ => path.to_string_lossy().to_string(),
    }
}

/// Validate every file in parallel and return reports sorted by file.
pub fn validate_files(
    validator: &Validator,
    files: &[PathBuf],
    root: &Path,
    baseline: Baseline,
    document_type: Option<DocumentType>,
) -> Vec<FileReport> {
    let mut reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| FileReport {
            file: display_path(path, root),
            result: validator.validate_file(path, baseline, document_type),
        })
        .collect();
    reports.sort_by(|a, b| a.file.cmp(&b.file));
    reports
}
