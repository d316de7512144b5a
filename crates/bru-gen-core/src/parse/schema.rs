use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    #[serde(other)]
    Unknown,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    /// The type used for example generation: the single type, or the first
    /// non-null entry of a type list.
    pub fn primary(&self) -> Option<&SchemaType> {
        match self {
            TypeSet::Single(t) => Some(t),
            TypeSet::Multiple(types) => types
                .iter()
                .find(|t| **t != SchemaType::Null)
                .or_else(|| types.first()),
        }
    }
}

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

/// The subset of a JSON Schema object that shapes an example value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    /// A property declared as `null` has no schema and is skipped.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Option<SchemaOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaOrRef>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaOrRef>,

    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<SchemaOrRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_deserializes_as_ref() {
        let s: SchemaOrRef =
            serde_json::from_str(r##"{"$ref": "#/components/schemas/Pet"}"##).unwrap();
        assert_eq!(
            s,
            SchemaOrRef::Ref {
                ref_path: "#/components/schemas/Pet".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_type_is_tolerated() {
        let s: Schema = serde_json::from_str(r#"{"type": "file"}"#).unwrap();
        assert_eq!(s.schema_type, Some(TypeSet::Single(SchemaType::Unknown)));
    }

    #[test]
    fn test_type_list_primary_skips_null() {
        let s: Schema = serde_json::from_str(r#"{"type": ["null", "integer"]}"#).unwrap();
        assert_eq!(
            s.schema_type.as_ref().and_then(TypeSet::primary),
            Some(&SchemaType::Integer)
        );
    }

    #[test]
    fn test_null_property_has_no_schema() {
        let s: Schema =
            serde_json::from_str(r#"{"type": "object", "properties": {"a": null, "b": {}}}"#)
                .unwrap();
        assert!(s.properties["a"].is_none());
        assert!(s.properties["b"].is_some());
    }
}
