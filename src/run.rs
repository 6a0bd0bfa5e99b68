//! Glue between configuration files, image sources and the engine.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::compute::evolution::{EvolutionEngine, Observer};
use crate::imaging::{ImageError, ImageSource, encode_pbm, source_for};
use crate::schema::{ConfigError, EvolutionConfigError, EvolutionResult, RunConfig, TargetImage};

/// Everything that can stop a run before or after the search itself.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error parsing config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("No target image given on the command line or in the config")]
    MissingImage,
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Evolution(#[from] EvolutionConfigError),
    #[error("Error serializing result: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read, parse and validate a JSON run configuration.
pub fn load_config(path: &Path) -> Result<RunConfig, RunError> {
    let text = fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: RunConfig = serde_json::from_str(&text).map_err(|source| RunError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Load the target named by `image`, falling back to `config.image.path`.
///
/// Netpbm files use the built-in decoder; other formats go through the
/// `image` crate.
pub fn load_target(config: &RunConfig, image: Option<&Path>) -> Result<TargetImage, RunError> {
    let path = image
        .or(config.image.path.as_deref())
        .ok_or(RunError::MissingImage)?;
    Ok(source_for(path, &config.image).load()?)
}

/// Run a full search on `target` and write any configured outputs.
pub fn execute<O>(
    config: &RunConfig,
    target: TargetImage,
    observer: &mut O,
) -> Result<EvolutionResult, RunError>
where
    O: Observer + ?Sized,
{
    let (width, height) = (target.width(), target.height());
    let mut engine = EvolutionEngine::new(config.evolution.clone(), target)?;
    let result = engine.run_with_observer(observer);

    if let Some(path) = &config.output {
        // Unevaluated fitness (infinity) is written as null.
        let json = serde_json::to_string_pretty(&result)?;
        write_file(path, json.as_bytes())?;
        info!("Wrote result to {}", path.display());
    }
    if let Some(path) = &config.evolved_image {
        write_file(path, &encode_pbm(width, height, &result.best.genes))?;
        info!("Wrote evolved image to {}", path.display());
    }

    Ok(result)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), RunError> {
    fs::write(path, contents).map_err(|source| RunError::Write {
        path: path.to_path_buf(),
        source,
    })
}
