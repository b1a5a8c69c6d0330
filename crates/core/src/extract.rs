//! Endpoint Filter & Extractor
//!
//! Turns the `paths` of an [`OpenApiDocument`] into an ordered list of
//! [`Endpoint`]s. Each endpoint is extracted by a pure function over the path
//! item and the schema registry; [`extract_endpoints`] folds them together in
//! document order.

use crate::error::{CodegenError, Result};
use crate::openapi::{ObjectSchema, OpenApiDocument, Operation, SchemaRegistry, reference_name};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Record fields set after the tags; a tag with one of these keys is dropped.
pub const SHADOWED_TAG_KEYS: &[&str] = &[
    "name",
    "inputs",
    "outputs",
    "example",
    "example_ts",
    "output",
];

/// Substrings that exclude a path from the generated docs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denylist {
    markers: Vec<String>,
}

impl Denylist {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// A denylist that keeps every path.
    pub fn none() -> Self {
        Self {
            markers: Vec::new(),
        }
    }

    pub fn excludes(&self, path: &str) -> bool {
        self.markers.iter().any(|m| path.contains(m.as_str()))
    }
}

impl Default for Denylist {
    /// Python execution, conditional and box nodes have no generated docs.
    fn default() -> Self {
        Self::new(["RunPython", "If", "Box"])
    }
}

/// How a raw property declaration refers to other schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyShape<'a> {
    /// `{"$ref": "#/components/schemas/X"}`
    Reference(&'a str),
    /// `{"type": "array", "items": {"$ref": "#/components/schemas/X"}}`
    ArrayOfReference(&'a str),
    Scalar,
}

impl<'a> PropertyShape<'a> {
    pub fn classify(raw: &'a Map<String, Value>) -> Self {
        if let Some(reference) = raw.get("$ref").and_then(Value::as_str) {
            return Self::Reference(reference);
        }
        if raw.get("type").and_then(Value::as_str) == Some("array")
            && let Some(reference) = raw
                .get("items")
                .and_then(|items| items.get("$ref"))
                .and_then(Value::as_str)
        {
            return Self::ArrayOfReference(reference);
        }
        Self::Scalar
    }
}

/// A resolved input or output field of an endpoint.
///
/// Serialises as a flat object: `name`, then `required` for inputs, then every
/// other field of the declaration in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Property {
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Metadata for one documented endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub tags: Map<String, Value>,
    pub inputs: Vec<Property>,
    pub outputs: Vec<Property>,
}

/// The retained endpoints, in document order, and the paths that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub endpoints: Vec<Endpoint>,
    pub skipped: Vec<String>,
}

/// Derives the endpoint name from its path key.
pub fn endpoint_name(path: &str) -> String {
    path.replace('/', "")
}

/// Splits a `key:value` tag on its first colon.
pub fn decode_tag(endpoint: &str, tag: &str) -> Result<(String, String)> {
    let (key, value) = tag.split_once(':').ok_or_else(|| CodegenError::MalformedTag {
        endpoint: endpoint.to_string(),
        tag: tag.to_string(),
    })?;
    Ok((key.to_string(), value.to_string()))
}

/// Resolves a single property declaration against the registry.
///
/// A direct reference merges the referenced schema over the raw fields; an
/// array of references gets its `items` replaced by the referenced schema.
/// `name` always comes from the declaring schema, and so does `required` when
/// a flag is given.
pub fn resolve_property(
    schema: &str,
    name: &str,
    raw: &Value,
    required: Option<bool>,
    registry: &SchemaRegistry<'_>,
) -> Result<Property> {
    let raw = raw.as_object().ok_or_else(|| CodegenError::MalformedSchema {
        name: schema.to_string(),
        reason: format!("property `{name}` is not an object"),
    })?;

    let mut fields = raw.clone();
    match PropertyShape::classify(raw) {
        PropertyShape::Reference(reference) => {
            let target = registry.resolve_ref(reference)?;
            let target = target.as_object().ok_or_else(|| CodegenError::MalformedSchema {
                name: reference_name(reference).to_string(),
                reason: "expected a JSON object".to_string(),
            })?;
            for (key, value) in target {
                fields.insert(key.clone(), value.clone());
            }
        }
        PropertyShape::ArrayOfReference(reference) => {
            let target = registry.resolve_ref(reference)?;
            fields.insert("items".to_string(), target.clone());
        }
        PropertyShape::Scalar => {}
    }

    fields.remove("name");
    if required.is_some() {
        fields.remove("required");
    }

    Ok(Property {
        name: name.to_string(),
        required,
        fields,
    })
}

/// Resolves every property of `schema` in declaration order.
///
/// With `with_required` each record carries its required flag.
pub fn resolve_properties(
    schema: &str,
    registry: &SchemaRegistry<'_>,
    with_required: bool,
) -> Result<Vec<Property>> {
    let object: ObjectSchema<'_> = registry.object(schema)?;
    object
        .properties()
        .map(|(name, raw)| {
            let required = with_required.then(|| object.is_required(name));
            resolve_property(schema, name, raw, required, registry)
        })
        .collect()
}

/// Extracts one retained endpoint.
pub fn extract_endpoint(
    path: &str,
    item: &Value,
    registry: &SchemaRegistry<'_>,
) -> Result<Endpoint> {
    let post = item
        .get("post")
        .ok_or_else(|| CodegenError::MissingOperation(path.to_string()))?;
    let operation: Operation =
        Operation::deserialize(post).map_err(|source| CodegenError::MalformedOperation {
            path: path.to_string(),
            source,
        })?;

    let name = endpoint_name(path);

    let mut description = operation.description;
    let mut tags = Map::new();
    for tag in &operation.tags {
        let (key, value) = decode_tag(&name, tag)?;
        if key == "description" {
            description = value;
        } else if SHADOWED_TAG_KEYS.contains(&key.as_str()) {
            debug!(endpoint = %name, key = %key, "Ignoring tag shadowed by a record field");
        } else {
            tags.insert(key, Value::String(value));
        }
    }

    let inputs = resolve_properties(&format!("{name}In"), registry, true)?;
    let outputs = resolve_properties(&format!("{name}Out"), registry, false)?;

    debug!(
        endpoint = %name,
        inputs = inputs.len(),
        outputs = outputs.len(),
        "Extracted endpoint"
    );

    Ok(Endpoint {
        name,
        description,
        tags,
        inputs,
        outputs,
    })
}

/// Extracts every path not excluded by `denylist`, in document order.
pub fn extract_endpoints(document: &OpenApiDocument, denylist: &Denylist) -> Result<Extraction> {
    let registry = document.registry();
    document
        .paths
        .iter()
        .try_fold(Extraction::default(), |mut extraction, (path, item)| {
            if denylist.excludes(path) {
                debug!(path = %path, "Skipping denylisted endpoint");
                extraction.skipped.push(path.clone());
            } else {
                extraction
                    .endpoints
                    .push(extract_endpoint(path, item, &registry)?);
            }
            Ok(extraction)
        })
}
