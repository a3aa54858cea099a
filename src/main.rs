//! FedRAMP validator binary entry point.
//! Delegates to library modules and maps outcomes to exit codes.

use clap::Parser;
use fedramp_validator::batch;
use fedramp_validator::cli::{Cli, Commands};
use fedramp_validator::config::{self, Effective};
use fedramp_validator::loader::load_document;
use fedramp_validator::models::{Baseline, DocumentType};
use fedramp_validator::output;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", output::error_prefix(), message);
    std::process::exit(2);
}

fn resolve(
    root: Option<&str>,
    baseline: Option<Baseline>,
    out: Option<&str>,
    registry: Option<&str>,
    patterns: &[String],
) -> Effective {
    config::resolve_effective(root, baseline, out, registry, patterns).unwrap_or_else(|e| fail(e))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Validate {
            patterns,
            root,
            baseline,
            document_type,
            output: out,
            registry,
        } => {
            let eff = resolve(
                root.as_deref(),
                baseline,
                out.as_deref(),
                registry.as_deref(),
                &patterns,
            );
            if let Some(note) = eff.defaults_note() {
                eprintln!("{} {}", output::note_prefix(), note);
            }
            if eff.patterns.is_empty() {
                fail("No documents to validate. Pass paths or set `patterns` in fedramp.toml.");
            }
            let validator = eff.validator().unwrap_or_else(|e| fail(e));
            let targets = batch::expand_patterns(&eff.patterns);
            for pat in &targets.unmatched {
                eprintln!("{} pattern matched no files: {}", output::warn_prefix(), pat);
            }
            if targets.files.is_empty() {
                fail("No files matched the given patterns.");
            }
            let reports = batch::validate_files(
                &validator,
                &targets.files,
                &eff.root,
                eff.baseline,
                document_type,
            );
            output::print_reports(&reports, &eff.output);
            if reports.iter().any(|r| !r.result.is_compliant()) {
                std::process::exit(1);
            }
        }
        Commands::Requirements {
            baseline,
            root,
            output: out,
            registry,
        } => {
            let eff = resolve(
                root.as_deref(),
                Some(baseline),
                out.as_deref(),
                registry.as_deref(),
                &[],
            );
            let validator = eff.validator().unwrap_or_else(|e| fail(e));
            output::print_requirements(
                baseline,
                validator.registry().requirements_for(baseline),
                &eff.output,
            );
        }
        Commands::Detect { path, output: out } => {
            let mode = out.as_deref().unwrap_or("human");
            if !config::OUTPUT_MODES.contains(&mode) {
                fail(format!("invalid output '{mode}' (expected human or json)"));
            }
            let document = load_document(std::path::Path::new(&path))
                .unwrap_or_else(|e| fail(format!("{path}: {e}")));
            output::print_detect(&path, DocumentType::detect(&document), mode);
        }
    }
}
