use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::operation::PathItem;
use super::server::Server;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub version: String,
}

/// Typed view of the parts of an OpenAPI 3.x document the generator reads.
///
/// Everything else (components, responses, security) is only reachable
/// through the raw tree held by [`OpenApiDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<String>,

    #[serde(default)]
    pub info: Info,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    /// Legacy `host` field, still emitted by some converters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,

    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

/// A parsed OpenAPI document: the raw JSON tree used for `$ref` walking plus
/// the typed view used for iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiDocument {
    raw: Value,
    spec: OpenApiSpec,
}

impl OpenApiDocument {
    pub(crate) fn new(raw: Value, spec: OpenApiSpec) -> Self {
        Self { raw, spec }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }

    /// API display name, falling back to `API` for untitled documents.
    pub fn api_name(&self) -> &str {
        let title = self.spec.info.title.trim();
        if title.is_empty() { "API" } else { title }
    }
}
