//! Output rendering for validate, requirements, and detect commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-file results and a top-level summary.

use crate::batch::{BatchSummary, FileReport};
use crate::models::{Baseline, BaselineRequirements, DocumentType, Issue, Severity};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn colors_on_stderr() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Prefix for fatal CLI messages.
pub fn error_prefix() -> String {
    if colors_on_stderr() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_on_stderr() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

pub fn warn_prefix() -> String {
    if colors_on_stderr() {
        "warning:".yellow().bold().to_string()
    } else {
        "warning:".to_string()
    }
}

fn print_json(value: &JsonVal) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("{} failed to render JSON: {e}", error_prefix()),
    }
}

fn severity_tag(sev: Severity, color: bool) -> (String, String) {
    let (tag, icon) = match sev {
        Severity::Error => ("⟦error⟧", "✖"),
        Severity::Warning => ("⟦warn⟧", "▲"),
        Severity::Info => ("⟦info⟧", "◆"),
    };
    if !color {
        return (icon.to_string(), tag.to_string());
    }
    match sev {
        Severity::Error => (icon.red().to_string(), tag.red().bold().to_string()),
        Severity::Warning => (icon.yellow().to_string(), tag.yellow().bold().to_string()),
        Severity::Info => (icon.blue().to_string(), tag.blue().bold().to_string()),
    }
}

/// One human-readable line per issue.
pub fn format_issue(file: &str, issue: &Issue, color: bool) -> String {
    let (icon, sev) = severity_tag(issue.severity, color);
    let file = if color {
        file.bold().to_string()
    } else {
        file.to_string()
    };
    let mut line = format!("{icon} {sev} {file} ❲{}❳", issue.code);
    if let Some(loc) = &issue.location {
        line.push(' ');
        line.push_str(loc);
    }
    line.push_str(" — ");
    line.push_str(&issue.message);
    if let Some(fix) = &issue.suggested_fix {
        line.push_str(&format!("\n    fix: {fix}"));
    }
    line
}

/// Print validation reports in the requested format.
pub fn print_reports(reports: &[FileReport], output: &str) {
    match output {
        "json" => print_json(&compose_reports_json(reports)),
        _ => {
            let color = use_colors(output);
            for r in reports {
                for issue in r.result.issues() {
                    println!("{}", format_issue(&r.file, issue, color));
                }
                let status = if r.result.is_compliant() {
                    if color {
                        "compliant".green().bold().to_string()
                    } else {
                        "compliant".to_string()
                    }
                } else if color {
                    "non-compliant".red().bold().to_string()
                } else {
                    "non-compliant".to_string()
                };
                let mut line = format!(
                    "{} {} ({}, {} baseline, {} ms)",
                    r.file,
                    status,
                    r.result.document_type(),
                    r.result.baseline(),
                    r.result.validation_time_ms()
                );
                if let Some(note) = &r.result.metadata().note {
                    line.push_str(&format!(" · {note}"));
                }
                println!("{line}");
            }
            let s = BatchSummary::of(reports);
            let summary = format!(
                "— Summary — files={} compliant={} non_compliant={} errors={} warnings={} infos={}",
                s.files, s.compliant, s.non_compliant, s.errors, s.warnings, s.infos
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{summary}");
            }
        }
    }
}

/// Compose the validate JSON object (pure) for testing/snapshot purposes.
pub fn compose_reports_json(reports: &[FileReport]) -> JsonVal {
    json!({
        "results": reports,
        "summary": BatchSummary::of(reports),
    })
}

/// Print the registry entry for one baseline.
pub fn print_requirements(baseline: Baseline, reqs: &BaselineRequirements, output: &str) {
    match output {
        "json" => print_json(&compose_requirements_json(baseline, reqs)),
        _ => {
            let color = use_colors(output);
            let title = format!("FedRAMP {} Baseline", baseline.title());
            if color {
                println!("{}", title.bold());
            } else {
                println!("{title}");
            }
            println!("  min_controls: {}", reqs.min_controls);
            println!(
                "  required_controls ({}): {}",
                reqs.required_controls.len(),
                reqs.required_controls.join(", ")
            );
            let meta: Vec<_> = reqs.required_metadata.iter().map(|m| m.as_str()).collect();
            println!("  required_metadata: {}", meta.join(", "));
            println!("  required_artifacts: {}", reqs.required_artifacts.join(", "));
        }
    }
}

pub fn compose_requirements_json(baseline: Baseline, reqs: &BaselineRequirements) -> JsonVal {
    json!({
        "baseline": baseline,
        "requirements": reqs,
    })
}

/// Print the detected model of one document.
pub fn print_detect(file: &str, document_type: DocumentType, output: &str) {
    match output {
        "json" => print_json(&json!({"file": file, "document_type": document_type})),
        _ => println!("{file}: {document_type}"),
    }
}
