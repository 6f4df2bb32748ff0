mod defaults;

pub use defaults::DefaultsConfig;

use crate::error::{CliError, Result};
use serde::Deserialize;
use ssim_core::engine::config::{DatasetConfig, DatasetConfigBuilder, UnmatchedFilePolicy};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialDatasetConfig {
    morphology: Option<String>,
    interactions: Option<String>,
    manifest: Option<PathBuf>,
    #[serde(rename = "skip-unmatched")]
    skip_unmatched: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPlotConfig {
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    datasets: BTreeMap<String, PartialDatasetConfig>,
    plot: Option<PartialPlotConfig>,
}

/// The configuration file, with relative paths anchored at its directory.
pub struct AppConfig {
    base_dir: PathBuf,
    file: FileConfig,
    pub defaults: DefaultsConfig,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&content, base_dir).map_err(|e| match e {
            CliError::Other(source) => CliError::FileParsing {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub(crate) fn parse(content: &str, base_dir: PathBuf) -> Result<Self> {
        let file: FileConfig = toml::from_str(content).map_err(anyhow::Error::from)?;
        Ok(Self {
            base_dir,
            file,
            defaults: DefaultsConfig::default(),
        })
    }

    pub fn dataset_names(&self) -> Vec<&str> {
        self.file.datasets.keys().map(String::as_str).collect()
    }

    pub fn dataset(&self, name: &str) -> Result<DatasetConfig> {
        let partial = self.file.datasets.get(name).ok_or_else(|| {
            CliError::Config(format!(
                "Dataset '{}' is not declared in the configuration file. Declared: {}.",
                name,
                self.dataset_names().join(", ")
            ))
        })?;

        let mut builder = DatasetConfigBuilder::new().name(name);
        if let Some(pattern) = &partial.morphology {
            builder = builder.morphology_pattern(self.resolve_pattern(pattern));
        }
        if let Some(pattern) = &partial.interactions {
            builder = builder.interaction_pattern(self.resolve_pattern(pattern));
        }
        if let Some(manifest) = &partial.manifest {
            builder = builder.manifest_path(self.base_dir.join(manifest));
        }
        if partial.skip_unmatched.unwrap_or(false) {
            builder = builder.unmatched_files(UnmatchedFilePolicy::Skip);
        }
        builder
            .build()
            .map_err(|e| CliError::Config(format!("Dataset '{}': {}", name, e)))
    }

    pub fn plot_size(&self) -> (u32, u32) {
        let plot = self.file.plot.as_ref();
        (
            plot.and_then(|p| p.width).unwrap_or(self.defaults.plot_width),
            plot.and_then(|p| p.height)
                .unwrap_or(self.defaults.plot_height),
        )
    }

    fn resolve_pattern(&self, pattern: &str) -> String {
        if Path::new(pattern).is_absolute() {
            pattern.to_string()
        } else {
            self.base_dir.join(pattern).to_string_lossy().into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssim_core::engine::config::InteractionSource;
    use std::fs;
    use tempfile::tempdir;

    const CONFIG: &str = r#"
        [plot]
        width = 1200

        [datasets.api]
        morphology = "API/*Morphology*.csv"
        interactions = "API/**/*)_*.csv"

        [datasets.apiexp]
        morphology = "APIEXP/*Morphology*.csv"
        manifest = "APIEXP/manifest.toml"
        skip-unmatched = true
    "#;

    #[test]
    fn datasets_resolve_relative_to_config_directory() {
        let config = AppConfig::parse(CONFIG, PathBuf::from("/study")).unwrap();

        let api = config.dataset("api").unwrap();
        assert_eq!(api.morphology_pattern, "/study/API/*Morphology*.csv");
        assert_eq!(
            api.interactions,
            InteractionSource::Pattern("/study/API/**/*)_*.csv".to_string())
        );
        assert_eq!(api.unmatched_files, UnmatchedFilePolicy::Strict);

        let apiexp = config.dataset("apiexp").unwrap();
        assert_eq!(
            apiexp.interactions,
            InteractionSource::Manifest(PathBuf::from("/study/APIEXP/manifest.toml"))
        );
        assert_eq!(apiexp.unmatched_files, UnmatchedFilePolicy::Skip);
    }

    #[test]
    fn plot_size_falls_back_to_defaults() {
        let config = AppConfig::parse(CONFIG, PathBuf::new()).unwrap();
        assert_eq!(config.plot_size(), (1200, 700));
        assert_eq!(config.dataset_names(), vec!["api", "apiexp"]);
    }

    #[test]
    fn unknown_dataset_is_a_config_error() {
        let config = AppConfig::parse(CONFIG, PathBuf::new()).unwrap();
        let err = config.dataset("excipient").err().unwrap();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("api, apiexp")));
    }

    #[test]
    fn dataset_without_interactions_is_a_config_error() {
        let config =
            AppConfig::parse("[datasets.api]\nmorphology = \"m.csv\"\n", PathBuf::new()).unwrap();
        assert!(matches!(config.dataset("api"), Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_keys_are_rejected_with_file_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ssim.toml");
        fs::write(&path, "[datasets.api]\nmorphologies = \"m.csv\"\n").unwrap();
        let err = AppConfig::from_file(&path).err().unwrap();
        assert!(matches!(err, CliError::FileParsing { path: p, .. } if p == path));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }
}
