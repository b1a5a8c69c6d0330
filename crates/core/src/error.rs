use std::path::PathBuf;

/// Every way a generation run can fail.
///
/// All variants are fatal: the generator stops at the first one and never
/// reaches the write step.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Endpoint {0} has no POST operation")]
    MissingOperation(String),
    #[error("Malformed operation for endpoint {path}: {source}")]
    MalformedOperation {
        path: String,
        source: serde_json::Error,
    },
    #[error("Schema not found: {0}")]
    MissingSchema(String),
    #[error("Malformed schema {name}: {reason}")]
    MalformedSchema { name: String, reason: String },
    #[error("Tag '{tag}' on endpoint {endpoint} is not of the form key:value")]
    MalformedTag { endpoint: String, tag: String },
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

pub type Result<T> = std::result::Result<T, CodegenError>;
