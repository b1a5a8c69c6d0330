use nodedocs_core::GeneratorPaths;
use std::path::PathBuf;
use tracing::Level;

pub const DEFAULT_SUBSTRATE_HOME: &str = "../substrate";
pub const SPEC_SUBPATH: &str = "site/public/openapi.json";
pub const EXAMPLES_SUBPATH: &str = "site/app/nodes/examples/inout";
pub const TEMPLATE_PATH: &str = "codegen/nodes.j2";
pub const OUTPUT_PATH: &str = "components/nodes.tsx";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
///
/// Only the base directory of the API repository is configurable. The
/// template and output paths are relative to the docs root the binary runs
/// from.
#[derive(Clone, Debug)]
pub struct Config {
    pub substrate_home: PathBuf,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let substrate_home = std::env::var("SUBSTRATE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SUBSTRATE_HOME));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            substrate_home,
            template_path: PathBuf::from(TEMPLATE_PATH),
            output_path: PathBuf::from(OUTPUT_PATH),
            log_level,
        })
    }

    pub fn spec_path(&self) -> PathBuf {
        self.substrate_home.join(SPEC_SUBPATH)
    }

    pub fn examples_dir(&self) -> PathBuf {
        self.substrate_home.join(EXAMPLES_SUBPATH)
    }

    pub fn generator_paths(&self) -> GeneratorPaths {
        GeneratorPaths {
            spec: self.spec_path(),
            template: self.template_path.clone(),
            output: self.output_path.clone(),
        }
    }
}
