//! Generation Pipeline
//!
//! Composes the four steps into a single linear run: load the document,
//! extract endpoints, load their examples, render and write. Any error stops
//! the run before the output file is touched.

use crate::error::Result;
use crate::examples::ExampleSource;
use crate::extract::{Denylist, extract_endpoints};
use crate::openapi::load_document;
use crate::render::{attach_examples, load_template, render_nodes, write_output};
use std::path::PathBuf;
use tracing::info;

/// Input and output locations of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorPaths {
    pub spec: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Names of the rendered nodes, in output order.
    pub nodes: Vec<String>,
    /// Path keys left out by the denylist.
    pub skipped: Vec<String>,
    pub bytes_written: usize,
    pub output: PathBuf,
}

/// A rendered document that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub nodes: Vec<String>,
    pub skipped: Vec<String>,
}

pub struct Generator<S> {
    paths: GeneratorPaths,
    denylist: Denylist,
    examples: S,
}

impl<S: ExampleSource> Generator<S> {
    /// Creates a generator with the default denylist.
    pub fn new(paths: GeneratorPaths, examples: S) -> Self {
        Self {
            paths,
            denylist: Denylist::default(),
            examples,
        }
    }

    pub fn with_denylist(mut self, denylist: Denylist) -> Self {
        self.denylist = denylist;
        self
    }

    /// Renders the whole document without writing anything.
    pub fn render(&self) -> Result<Rendered> {
        let document = load_document(&self.paths.spec)?;
        let extraction = extract_endpoints(&document, &self.denylist)?;
        info!(
            retained = extraction.endpoints.len(),
            skipped = extraction.skipped.len(),
            "Extracted endpoints"
        );

        let nodes = attach_examples(extraction.endpoints, &self.examples)?;
        let template = load_template(&self.paths.template)?;
        let text = render_nodes(&template, &nodes)?;

        Ok(Rendered {
            text,
            nodes: nodes.into_iter().map(|n| n.endpoint.name).collect(),
            skipped: extraction.skipped,
        })
    }

    /// Runs the pipeline end to end and overwrites the output file.
    pub fn run(&self) -> Result<GenerationSummary> {
        let rendered = self.render()?;
        let bytes_written = write_output(&self.paths.output, &rendered.text)?;

        Ok(GenerationSummary {
            nodes: rendered.nodes,
            skipped: rendered.skipped,
            bytes_written,
            output: self.paths.output.clone(),
        })
    }
}
