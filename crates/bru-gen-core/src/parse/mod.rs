pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod request_body;
pub mod schema;
pub mod server;
pub mod spec;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::ParseError;
use spec::{OpenApiDocument, OpenApiSpec};

/// Read and parse an OpenAPI document from disk. `.yaml`/`.yml` files are
/// parsed as YAML, everything else as JSON.
pub fn from_path(path: &Path) -> Result<OpenApiDocument, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ParseError::InputNotFound(path.to_path_buf()),
        _ => ParseError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => from_yaml(&content),
        _ => from_json(&content),
    }
}

/// Parse an OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<OpenApiDocument, ParseError> {
    let raw: Value = serde_json::from_str(input)?;
    from_value(raw)
}

/// Parse an OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiDocument, ParseError> {
    let raw: Value = serde_yaml_ng::from_str(input)?;
    from_value(raw)
}

fn from_value(raw: Value) -> Result<OpenApiDocument, ParseError> {
    let root = raw.as_object().ok_or(ParseError::NotAnObject)?;

    if let Some(swagger) = root.get("swagger") {
        let version = swagger
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| swagger.to_string());
        return Err(ParseError::LegacySwagger(version));
    }

    if !root.get("paths").is_some_and(Value::is_object) {
        return Err(ParseError::MissingField("paths".to_string()));
    }

    let spec: OpenApiSpec = serde_json::from_value(raw.clone())?;
    validate_version(&spec)?;
    log::debug!(
        "parsed OpenAPI {} document with {} paths",
        spec.openapi.as_deref().unwrap_or_default(),
        spec.paths.len()
    );
    Ok(OpenApiDocument::new(raw, spec))
}

fn validate_version(spec: &OpenApiSpec) -> Result<(), ParseError> {
    match spec.openapi.as_deref() {
        None => Err(ParseError::MissingField("openapi".to_string())),
        Some(version) if !version.starts_with("3.") => {
            Err(ParseError::UnsupportedVersion(version.to_string()))
        }
        Some(_) => Ok(()),
    }
}
