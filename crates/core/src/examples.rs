//! Example Loader
//!
//! Each documented node ships three hand-written artifacts next to each other:
//! `<Name>In.py`, `<Name>In.ts` and `<Name>Out.json`. They are read as raw
//! text and never parsed.

use crate::error::{CodegenError, Result};
use std::path::PathBuf;

/// The raw example artifacts of one node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExampleSet {
    pub python: String,
    pub typescript: String,
    pub output: String,
}

/// Anything that can hand back the examples for a node by name.
#[cfg_attr(test, mockall::automock)]
pub trait ExampleSource {
    /// Loads all three artifacts for `node`. Any missing artifact is an error.
    fn load(&self, node: &str) -> Result<ExampleSet>;
}

/// Reads examples from a single directory using the `<Name>In.*` convention.
#[derive(Debug, Clone)]
pub struct DirectoryExamples {
    dir: PathBuf,
}

impl DirectoryExamples {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn python_path(&self, node: &str) -> PathBuf {
        self.dir.join(format!("{node}In.py"))
    }

    pub fn typescript_path(&self, node: &str) -> PathBuf {
        self.dir.join(format!("{node}In.ts"))
    }

    pub fn output_path(&self, node: &str) -> PathBuf {
        self.dir.join(format!("{node}Out.json"))
    }
}

fn read_artifact(path: PathBuf) -> Result<String> {
    std::fs::read_to_string(&path).map_err(|source| CodegenError::Read { path, source })
}

impl ExampleSource for DirectoryExamples {
    fn load(&self, node: &str) -> Result<ExampleSet> {
        Ok(ExampleSet {
            python: read_artifact(self.python_path(node))?,
            typescript: read_artifact(self.typescript_path(node))?,
            output: read_artifact(self.output_path(node))?,
        })
    }
}
