//! OpenAPI Document Model
//!
//! Only the parts of the document the generator reads are typed. Paths and
//! component schemas stay as insertion-ordered JSON maps so that endpoint and
//! property order follow the document, and so that a path is only required to
//! be well formed once the extractor decides to keep it.

use crate::error::{CodegenError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

/// The top-level OpenAPI document.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenApiDocument {
    pub paths: Map<String, Value>,
    #[serde(default)]
    pub components: Components,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: Map<String, Value>,
}

/// The `post` operation of a single path.
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl OpenApiDocument {
    /// Returns a read-only view over `components.schemas`.
    pub fn registry(&self) -> SchemaRegistry<'_> {
        SchemaRegistry::new(&self.components.schemas)
    }
}

/// Reads and parses the OpenAPI document at `path`.
pub fn load_document(path: &Path) -> Result<OpenApiDocument> {
    let text = std::fs::read_to_string(path).map_err(|source| CodegenError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: OpenApiDocument =
        serde_json::from_str(&text).map_err(|source| CodegenError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        path = %path.display(),
        paths = document.paths.len(),
        schemas = document.components.schemas.len(),
        "Loaded OpenAPI document"
    );
    Ok(document)
}

/// Lookup over the named component schemas. Never mutated.
#[derive(Debug, Clone, Copy)]
pub struct SchemaRegistry<'a> {
    schemas: &'a Map<String, Value>,
}

impl<'a> SchemaRegistry<'a> {
    pub fn new(schemas: &'a Map<String, Value>) -> Self {
        Self { schemas }
    }

    pub fn get(&self, name: &str) -> Result<&'a Value> {
        self.schemas
            .get(name)
            .ok_or_else(|| CodegenError::MissingSchema(name.to_string()))
    }

    /// Resolves a `$ref` such as `#/components/schemas/Point`.
    ///
    /// Only the last path segment is significant.
    pub fn resolve_ref(&self, reference: &str) -> Result<&'a Value> {
        self.get(reference_name(reference))
    }

    /// Looks up `name` and views it as an object schema.
    pub fn object(&self, name: &str) -> Result<ObjectSchema<'a>> {
        ObjectSchema::from_value(name, self.get(name)?)
    }
}

/// Returns the schema name a `$ref` points at.
pub fn reference_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// An object schema: ordered properties plus the set of required names.
#[derive(Debug, Clone)]
pub struct ObjectSchema<'a> {
    pub properties: &'a Map<String, Value>,
    pub required: Vec<&'a str>,
}

impl<'a> ObjectSchema<'a> {
    pub fn from_value(name: &str, value: &'a Value) -> Result<Self> {
        let malformed = |reason: &str| CodegenError::MalformedSchema {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let object = value
            .as_object()
            .ok_or_else(|| malformed("expected a JSON object"))?;

        let properties = match object.get("properties") {
            Some(Value::Object(map)) => map,
            Some(_) => return Err(malformed("`properties` is not an object")),
            None => return Err(malformed("missing `properties`")),
        };

        let required = match object.get("required") {
            None => Vec::new(),
            Some(Value::Array(names)) => names
                .iter()
                .map(|n| n.as_str().ok_or_else(|| malformed("`required` holds a non-string")))
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(malformed("`required` is not an array")),
        };

        Ok(Self {
            properties,
            required,
        })
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.contains(&property)
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&'a String, &'a Value)> + use<'a> {
        let properties: &'a Map<String, Value> = self.properties;
        properties.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_reference_name_takes_last_segment() {
        assert_eq!(reference_name("#/components/schemas/Point"), "Point");
        assert_eq!(reference_name("Point"), "Point");
    }

    #[test]
    fn test_registry_lookup() {
        let schemas = json!({ "Point": { "type": "object" } });
        let registry = SchemaRegistry::new(schemas.as_object().unwrap());

        assert_eq!(
            registry.resolve_ref("#/components/schemas/Point").unwrap(),
            &json!({ "type": "object" })
        );
        match registry.get("Missing").unwrap_err() {
            CodegenError::MissingSchema(name) => assert_eq!(name, "Missing"),
            other => panic!("Expected MissingSchema, got {other:?}"),
        }
    }

    #[test]
    fn test_object_schema_keeps_declaration_order() {
        let schema = json!({
            "properties": {
                "zeta": { "type": "string" },
                "alpha": { "type": "integer" },
                "mid": { "type": "boolean" }
            },
            "required": ["alpha"]
        });
        let object = ObjectSchema::from_value("FooIn", &schema).unwrap();

        let names: Vec<_> = object.properties().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert!(object.is_required("alpha"));
        assert!(!object.is_required("zeta"));
    }

    #[test]
    fn test_object_schema_requires_properties() {
        let schema = json!({ "type": "object" });
        match ObjectSchema::from_value("EmptyOut", &schema).unwrap_err() {
            CodegenError::MalformedSchema { name, reason } => {
                assert_eq!(name, "EmptyOut");
                assert!(reason.contains("properties"));
            }
            other => panic!("Expected MalformedSchema, got {other:?}"),
        }

        let schema = json!({ "properties": {} });
        let object = ObjectSchema::from_value("EmptyOut", &schema).unwrap();
        assert_eq!(object.properties().count(), 0);
    }

    #[test]
    fn test_object_schema_rejects_bad_required() {
        let schema = json!({ "properties": {}, "required": "a" });
        let err = ObjectSchema::from_value("FooIn", &schema).unwrap_err();
        assert!(matches!(err, CodegenError::MalformedSchema { .. }));
    }

    #[test]
    fn test_load_document_reads_paths_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"paths": {{"/B": {{}}, "/A": {{}}}}, "components": {{"schemas": {{}}}}}}"#
        )
        .unwrap();

        let document = load_document(file.path()).unwrap();
        let keys: Vec<_> = document.paths.keys().cloned().collect();
        assert_eq!(keys, vec!["/B", "/A"]);
    }

    #[test]
    fn test_load_document_failures() {
        let err = load_document(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CodegenError::Read { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load_document(file.path()).unwrap_err();
        assert!(matches!(err, CodegenError::Json { .. }));
    }
}
