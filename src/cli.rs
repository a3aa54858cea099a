//! CLI argument parsing via `clap`.

use crate::models::{Baseline, DocumentType};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fedramp-validator",
    version,
    about = "FedRAMP constraint validator for OSCAL documents",
    long_about = "Validate OSCAL System Security Plans against FedRAMP Low, Moderate, and High baseline requirements.\n\nConfiguration precedence: CLI > fedramp.toml > defaults.",
    after_help = "Examples:\n  fedramp-validator validate ssp.json --baseline high\n  fedramp-validator validate 'docs/**/*.json' --output json\n  fedramp-validator requirements moderate\n  fedramp-validator detect ssp.json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug); RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current validator version.")]
    Version,
    /// Validate documents against a FedRAMP baseline
    #[command(
        about = "Validate documents",
        long_about = "Validate files matched by the given paths or glob patterns. Exits 1 when any document is non-compliant, 2 on usage or configuration errors.",
        after_help = "Examples:\n  fedramp-validator validate ssp.json\n  fedramp-validator validate ssp.json --baseline low --type ssp"
    )]
    Validate {
        #[arg(help = "Files or glob patterns (default: patterns from fedramp.toml)")]
        patterns: Vec<String>,
        #[arg(
            long,
            help = "Config root (default: current dir or nearest ancestor with fedramp.toml)"
        )]
        root: Option<String>,
        #[arg(long, help = "Baseline: low|moderate|high (default: moderate)")]
        baseline: Option<Baseline>,
        #[arg(
            long = "type",
            help = "Force document type instead of detecting it (e.g. ssp, catalog)"
        )]
        document_type: Option<DocumentType>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Baseline registry override (TOML or YAML)")]
        registry: Option<String>,
    },
    /// Show baseline requirements
    #[command(
        about = "Show baseline requirements",
        long_about = "Print the controls, metadata, and artifacts the registry demands for a baseline."
    )]
    Requirements {
        #[arg(help = "Baseline: low|moderate|high")]
        baseline: Baseline,
        #[arg(long, help = "Config root (default: current dir)")]
        root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Baseline registry override (TOML or YAML)")]
        registry: Option<String>,
    },
    /// Detect the OSCAL model of a document
    #[command(
        about = "Detect document type",
        long_about = "Load a document and print which OSCAL model its root key identifies."
    )]
    Detect {
        #[arg(help = "Document to inspect")]
        path: String,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
