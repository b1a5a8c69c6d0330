//! Renderer
//!
//! Pairs every extracted endpoint with its examples, renders the node template
//! against the whole list and writes the result in one go.

use crate::error::{CodegenError, Result};
use crate::examples::ExampleSource;
use crate::extract::Endpoint;
use minijinja::{AutoEscape, Environment, context};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// One entry of the `nodes` template variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    #[serde(flatten)]
    pub endpoint: Endpoint,
    /// Python snippet.
    pub example: String,
    /// TypeScript snippet.
    pub example_ts: String,
    /// Example output document.
    pub output: String,
}

/// A template loaded from disk, keyed by its file name for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub name: String,
    pub source: String,
}

impl TemplateSource {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Loads the examples for every endpoint, keeping endpoint order.
pub fn attach_examples<S>(endpoints: Vec<Endpoint>, source: &S) -> Result<Vec<NodeRecord>>
where
    S: ExampleSource + ?Sized,
{
    endpoints
        .into_iter()
        .map(|endpoint| {
            let examples = source.load(&endpoint.name)?;
            Ok(NodeRecord {
                endpoint,
                example: examples.python,
                example_ts: examples.typescript,
                output: examples.output,
            })
        })
        .collect()
}

pub fn load_template(path: &Path) -> Result<TemplateSource> {
    let source = std::fs::read_to_string(path).map_err(|source| CodegenError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(TemplateSource { name, source })
}

/// Renders `template` with `nodes` as its only variable.
pub fn render_nodes(template: &TemplateSource, nodes: &[NodeRecord]) -> Result<String> {
    let mut env = Environment::new();
    // The output is source code, not HTML.
    env.set_auto_escape_callback(|_| AutoEscape::None);

    let tmpl = env.template_from_named_str(&template.name, &template.source)?;
    let rendered = tmpl.render(context! { nodes => nodes })?;
    Ok(rendered)
}

/// Writes the rendered file, replacing whatever was there. Returns the byte count.
pub fn write_output(path: &Path, rendered: &str) -> Result<usize> {
    std::fs::write(path, rendered).map_err(|source| CodegenError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = rendered.len(), "Wrote generated file");
    Ok(rendered.len())
}
