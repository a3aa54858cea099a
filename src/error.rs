//! Error types for the validation engine and its configuration layer.
//!
//! Rule checkers never raise: they return `CheckError`, which the validator
//! turns into a `FEDRAMP_VALIDATION_ERROR` issue. `LoadError` is converted the
//! same way by the loader. Only `ConfigError` ever reaches a process exit.

use std::path::PathBuf;

/// A value in the document tree had an unexpected JSON type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} at '{path}', found {found}")]
pub struct AccessError {
    pub path: String,
    pub expected: &'static str,
    pub found: &'static str,
}

/// Failure of a single rule checker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// A container or leaf in the tree had a shape the rule cannot interpret.
    #[error("unexpected document shape: {0}")]
    UnexpectedShape(#[from] AccessError),
}

impl CheckError {
    /// Stable identifier recorded in issue context.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnexpectedShape(_) => "unexpected_shape",
        }
    }

    /// Tree path the failure refers to.
    pub fn path(&self) -> &str {
        match self {
            Self::UnexpectedShape(e) => &e.path,
        }
    }
}

/// Failure to read or decode a source document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("XML parsing not yet implemented")]
    XmlNotSupported,
}

impl LoadError {
    /// Stable identifier recorded in issue context.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Decode(_) => "decode",
            Self::XmlNotSupported => "xml_not_supported",
        }
    }
}

/// Configuration and registry file errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in '{path}': {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid YAML in '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported file extension for '{path}' (expected .toml, .yaml or .yml)")]
    UnknownFormat { path: PathBuf },

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// A baseline name other than low, moderate or high.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown baseline '{0}' (expected low, moderate or high)")]
pub struct UnknownBaseline(pub String);

/// A document type name that is not an OSCAL model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document type '{0}'")]
pub struct UnknownDocumentType(pub String);
