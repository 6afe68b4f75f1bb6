//! @acp:module "Errors"
//! @acp:summary "Error types for model loading, configuration and rendering"
//! @acp:domain cli
//! @acp:layer utility
//!
//! The grouping core itself never fails; everything here belongs to the
//! surrounding driver (file loading, templates, configuration).

use std::path::PathBuf;

use thiserror::Error;

/// Result type for docgroup operations
pub type Result<T> = std::result::Result<T, DocError>;

/// @acp:summary "Main error type for docgroup"
#[derive(Debug, Error)]
pub enum DocError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Template registration error
    #[error("Template parse error: {0}")]
    TemplateParse(#[from] Box<handlebars::TemplateError>),

    /// Model file with an extension we cannot read
    #[error("Unsupported model file: {0}")]
    UnsupportedModel(PathBuf),

    /// Unknown compatibility rule name in configuration
    #[error("Unknown compatibility rule: {0}")]
    UnknownRule(String),

    /// Unknown output format
    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    /// Class not present in the catalog
    #[error("Class not found: {0}")]
    ClassNotFound(String),

    #[error("{0}")]
    Other(String),
}

impl From<handlebars::TemplateError> for DocError {
    fn from(err: handlebars::TemplateError) -> Self {
        DocError::TemplateParse(Box::new(err))
    }
}
