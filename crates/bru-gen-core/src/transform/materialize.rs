use serde_json::{Map, Value};

use crate::error::ResolveError;
use crate::parse::ref_resolve::resolve_as;
use crate::parse::schema::{Schema, SchemaOrRef, SchemaType};
use crate::parse::spec::OpenApiDocument;

/// Stand-in for every string value in generated examples.
pub const PLACEHOLDER: &str = "{{PLACEHOLDER}}";

/// Expand a schema into an example value.
///
/// Objects keep their declared property order, arrays always hold exactly
/// one sample item, and primitives become fixed placeholders. An absent
/// schema yields `null`.
///
/// References are followed through the document tree. A reference that is
/// reached again while it is still being expanded is reported as
/// [`ResolveError::CircularRef`]: recursive schemas have no finite example.
pub fn materialize(
    schema: Option<&SchemaOrRef>,
    document: &OpenApiDocument,
) -> Result<Value, ResolveError> {
    match schema {
        Some(schema) => Materializer::new(document).schema_or_ref(schema),
        None => Ok(Value::Null),
    }
}

struct Materializer<'a> {
    document: &'a OpenApiDocument,
    /// References currently being expanded, outermost first.
    active: Vec<String>,
}

impl<'a> Materializer<'a> {
    fn new(document: &'a OpenApiDocument) -> Self {
        Self {
            document,
            active: Vec::new(),
        }
    }

    fn schema_or_ref(&mut self, schema_or_ref: &SchemaOrRef) -> Result<Value, ResolveError> {
        match schema_or_ref {
            SchemaOrRef::Ref { ref_path } => {
                if self.active.contains(ref_path) {
                    let mut chain = self.active.clone();
                    chain.push(ref_path.clone());
                    return Err(ResolveError::CircularRef(chain.join(" -> ")));
                }
                let target: SchemaOrRef = resolve_as(self.document.raw(), ref_path, "schema")?;
                self.active.push(ref_path.clone());
                let value = self.schema_or_ref(&target);
                self.active.pop();
                value
            }
            SchemaOrRef::Schema(schema) => self.schema(schema),
        }
    }

    fn schema(&mut self, schema: &Schema) -> Result<Value, ResolveError> {
        if !schema.all_of.is_empty() {
            return self.all_of(schema);
        }
        if let Some(first) = schema.one_of.first().or_else(|| schema.any_of.first()) {
            return self.schema_or_ref(first);
        }

        match schema.schema_type.as_ref().and_then(|t| t.primary()) {
            Some(SchemaType::Object) => self.object(schema),
            Some(SchemaType::Array) => self.array(schema),
            Some(SchemaType::Integer) => Ok(Value::from(0)),
            Some(SchemaType::Number) => Ok(Value::from(0.0)),
            Some(SchemaType::Boolean) => Ok(Value::Bool(false)),
            Some(SchemaType::Null) => Ok(Value::Null),
            None if !schema.properties.is_empty() => self.object(schema),
            Some(SchemaType::String | SchemaType::Unknown) | None => {
                Ok(Value::String(PLACEHOLDER.to_string()))
            }
        }
    }

    fn object(&mut self, schema: &Schema) -> Result<Value, ResolveError> {
        let mut map = Map::new();
        for (name, property) in &schema.properties {
            if let Some(property) = property {
                map.insert(name.clone(), self.schema_or_ref(property)?);
            }
        }
        Ok(Value::Object(map))
    }

    fn array(&mut self, schema: &Schema) -> Result<Value, ResolveError> {
        match &schema.items {
            Some(items) => Ok(Value::Array(vec![self.schema_or_ref(items)?])),
            None => Ok(Value::Array(Vec::new())),
        }
    }

    /// Merge the object members of an `allOf`, then the schema's own
    /// properties. A lone non-object member is returned as is.
    fn all_of(&mut self, schema: &Schema) -> Result<Value, ResolveError> {
        let mut merged = Map::new();
        let mut last_scalar = None;
        for member in &schema.all_of {
            match self.schema_or_ref(member)? {
                Value::Object(map) => merged.extend(map),
                other => last_scalar = Some(other),
            }
        }
        if let Value::Object(own) = self.object(schema)? {
            merged.extend(own);
        }
        match last_scalar {
            Some(value) if merged.is_empty() => Ok(value),
            _ => Ok(Value::Object(merged)),
        }
    }
}
