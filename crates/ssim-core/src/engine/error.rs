use super::config::ConfigError;
use crate::core::io::filename::FileNameError;
use crate::core::io::interaction::InteractionFileError;
use crate::core::io::locator::LocateError;
use crate::core::io::manifest::ManifestError;
use crate::core::io::morphology::MorphologyFileError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid dataset configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error(
        "Ambiguous morphology source: pattern '{pattern}' matched {found} file(s), expected one or two"
    )]
    AmbiguousMorphologySource { pattern: String, found: usize },

    #[error(transparent)]
    Morphology(#[from] MorphologyFileError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Unrecognized interaction file '{path}': {source}", path = path.display())]
    FileName {
        path: PathBuf,
        #[source]
        source: FileNameError,
    },

    #[error(transparent)]
    InteractionFile(#[from] InteractionFileError),

    #[error("No interaction data: {0}")]
    NoInteractionData(String),
}
