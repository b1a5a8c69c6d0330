//! Entrypoint for the node docs generator
//!
//! Run from the docs root. This binary:
//! 1. Loads configuration from the environment (`SUBSTRATE_HOME`, `RUST_LOG`).
//! 2. Initializes logging.
//! 3. Renders `codegen/nodes.j2` against the OpenAPI document and the
//!    hand-written examples, then writes `components/nodes.tsx`.

use anyhow::Context;
use nodedocs_codegen::config::Config;
use nodedocs_core::{DirectoryExamples, Generator};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!(
        substrate_home = %config.substrate_home.display(),
        "Configuration loaded. Generating node docs..."
    );

    // --- 3. Generate ---
    let generator = Generator::new(
        config.generator_paths(),
        DirectoryExamples::new(config.examples_dir()),
    );
    let summary = generator.run().with_context(|| {
        format!(
            "Failed to generate {} from {}",
            config.output_path.display(),
            config.spec_path().display()
        )
    })?;

    info!(
        nodes = summary.nodes.len(),
        skipped = summary.skipped.len(),
        bytes = summary.bytes_written,
        output = %summary.output.display(),
        "Node docs generated."
    );
    Ok(())
}
