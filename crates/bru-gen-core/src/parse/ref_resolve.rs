use serde::de::DeserializeOwned;
use serde_json::Value;

use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::{RequestBody, RequestBodyOrRef};
use crate::error::ResolveError;

/// Walk a local `$ref` pointer (`#/components/schemas/Pet`) through the raw
/// document tree. External references are rejected.
pub fn resolve_pointer<'a>(root: &'a Value, ref_path: &str) -> Result<&'a Value, ResolveError> {
    let pointer = ref_path
        .strip_prefix('#')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;

    pointer
        .split('/')
        .skip_while(|segment| segment.is_empty())
        .map(unescape_segment)
        .try_fold(root, |node, segment| {
            let next = match node {
                Value::Object(map) => map.get(&segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            next.ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
        })
}

/// Resolve a pointer and deserialize the target node.
pub fn resolve_as<T: DeserializeOwned>(
    root: &Value,
    ref_path: &str,
    kind: &'static str,
) -> Result<T, ResolveError> {
    let node = resolve_pointer(root, ref_path)?;
    serde_json::from_value(node.clone()).map_err(|source| ResolveError::InvalidTarget {
        reference: ref_path.to_string(),
        kind,
        source,
    })
}

/// Resolve a parameter, following reference chains until an inline
/// parameter is found.
pub fn resolve_parameter(root: &Value, param: &ParameterOrRef) -> Result<Parameter, ResolveError> {
    let mut current = param.clone();
    let mut seen: Vec<String> = Vec::new();
    loop {
        match current {
            ParameterOrRef::Parameter(p) => return Ok(p),
            ParameterOrRef::Ref { ref_path } => {
                if seen.contains(&ref_path) {
                    seen.push(ref_path);
                    return Err(ResolveError::CircularRef(seen.join(" -> ")));
                }
                current = resolve_as(root, &ref_path, "parameter")?;
                seen.push(ref_path);
            }
        }
    }
}

/// Resolve a request body, following reference chains.
pub fn resolve_request_body(
    root: &Value,
    body: &RequestBodyOrRef,
) -> Result<RequestBody, ResolveError> {
    let mut current = body.clone();
    let mut seen: Vec<String> = Vec::new();
    loop {
        match current {
            RequestBodyOrRef::RequestBody(rb) => return Ok(rb),
            RequestBodyOrRef::Ref { ref_path } => {
                if seen.contains(&ref_path) {
                    seen.push(ref_path);
                    return Err(ResolveError::CircularRef(seen.join(" -> ")));
                }
                current = resolve_as(root, &ref_path, "request body")?;
                seen.push(ref_path);
            }
        }
    }
}

/// JSON Pointer escaping: `~1` is `/`, `~0` is `~`.
fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parameter::ParameterLocation;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "components": {
                "schemas": {
                    "Pet": {"type": "object"},
                    "a/b": {"type": "string"}
                },
                "parameters": {
                    "Limit": {"name": "limit", "in": "query"},
                    "Alias": {"$ref": "#/components/parameters/Limit"},
                    "Loop": {"$ref": "#/components/parameters/Loop"}
                }
            },
            "definitions": {
                "Legacy": {"type": "integer"}
            },
            "list": [{"type": "boolean"}]
        })
    }

    #[test]
    fn test_resolve_component_schema() {
        let root = doc();
        let node = resolve_pointer(&root, "#/components/schemas/Pet").unwrap();
        assert_eq!(node, &json!({"type": "object"}));
    }

    #[test]
    fn test_resolve_definitions_and_array_index() {
        let root = doc();
        assert_eq!(
            resolve_pointer(&root, "#/definitions/Legacy").unwrap(),
            &json!({"type": "integer"})
        );
        assert_eq!(
            resolve_pointer(&root, "#/list/0").unwrap(),
            &json!({"type": "boolean"})
        );
    }

    #[test]
    fn test_resolve_escaped_segment() {
        let root = doc();
        assert_eq!(
            resolve_pointer(&root, "#/components/schemas/a~1b").unwrap(),
            &json!({"type": "string"})
        );
    }

    #[test]
    fn test_missing_segment_is_an_error() {
        let root = doc();
        let err = resolve_pointer(&root, "#/components/schemas/Missing").unwrap_err();
        assert!(matches!(err, ResolveError::RefTargetNotFound(_)));
    }

    #[test]
    fn test_external_reference_is_rejected() {
        let root = doc();
        let err = resolve_pointer(&root, "other.json#/Pet").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidRefFormat(_)));
    }

    #[test]
    fn test_resolve_parameter_chain() {
        let root = doc();
        let param = ParameterOrRef::Ref {
            ref_path: "#/components/parameters/Alias".to_string(),
        };
        let resolved = resolve_parameter(&root, &param).unwrap();
        assert_eq!(resolved.name, "limit");
        assert_eq!(resolved.location, ParameterLocation::Query);
    }

    #[test]
    fn test_resolve_parameter_loop() {
        let root = doc();
        let param = ParameterOrRef::Ref {
            ref_path: "#/components/parameters/Loop".to_string(),
        };
        let err = resolve_parameter(&root, &param).unwrap_err();
        assert!(matches!(err, ResolveError::CircularRef(_)));
    }
}
