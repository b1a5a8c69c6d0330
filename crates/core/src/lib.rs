//! nodedocs core library
//!
//! Reads an OpenAPI document, resolves the input and output schema of every
//! documented node, pairs each node with its hand-written examples and renders
//! them through a single template. The `nodedocs-generate` binary is a thin
//! wrapper around [`pipeline::Generator`].

pub mod error;
pub mod examples;
pub mod extract;
pub mod openapi;
pub mod pipeline;
pub mod render;

pub use error::{CodegenError, Result};
pub use examples::{DirectoryExamples, ExampleSet, ExampleSource};
pub use extract::{Denylist, Endpoint, Property};
pub use pipeline::{GenerationSummary, Generator, GeneratorPaths};
