use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Interaction files must come from either a file pattern or a manifest, not both")]
    ConflictingInteractionSources,
}

/// What to do with a data file whose name does not encode a facet pair and sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedFilePolicy {
    /// Fail the whole run.
    #[default]
    Strict,
    /// Leave the file out, log a warning and list it in the load report.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionSource {
    /// Glob pattern; metadata is parsed from each file name.
    Pattern(String),
    /// TOML manifest declaring each file's facet pair and sizes.
    Manifest(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub name: String,
    pub morphology_pattern: String,
    pub interactions: InteractionSource,
    pub unmatched_files: UnmatchedFilePolicy,
}

#[derive(Default)]
pub struct DatasetConfigBuilder {
    name: Option<String>,
    morphology_pattern: Option<String>,
    interaction_pattern: Option<String>,
    manifest_path: Option<PathBuf>,
    unmatched_files: Option<UnmatchedFilePolicy>,
}

impl DatasetConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    pub fn morphology_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.morphology_pattern = Some(pattern.into());
        self
    }
    pub fn interaction_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.interaction_pattern = Some(pattern.into());
        self
    }
    pub fn manifest_path(mut self, path: PathBuf) -> Self {
        self.manifest_path = Some(path);
        self
    }
    pub fn unmatched_files(mut self, policy: UnmatchedFilePolicy) -> Self {
        self.unmatched_files = Some(policy);
        self
    }

    pub fn build(self) -> Result<DatasetConfig, ConfigError> {
        let interactions = match (self.interaction_pattern, self.manifest_path) {
            (Some(pattern), None) => InteractionSource::Pattern(pattern),
            (None, Some(path)) => InteractionSource::Manifest(path),
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingInteractionSources),
            (None, None) => return Err(ConfigError::MissingParameter("interactions")),
        };
        Ok(DatasetConfig {
            name: self.name.ok_or(ConfigError::MissingParameter("name"))?,
            morphology_pattern: self
                .morphology_pattern
                .ok_or(ConfigError::MissingParameter("morphology_pattern"))?,
            interactions,
            unmatched_files: self.unmatched_files.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_with_pattern_defaults_to_strict_policy() {
        let config = DatasetConfigBuilder::new()
            .name("api")
            .morphology_pattern("data/**/*Morphology*.csv")
            .interaction_pattern("data/**/*)_*.csv")
            .build()
            .unwrap();
        assert_eq!(config.name, "api");
        assert_eq!(
            config.interactions,
            InteractionSource::Pattern("data/**/*)_*.csv".to_string())
        );
        assert_eq!(config.unmatched_files, UnmatchedFilePolicy::Strict);
    }

    #[test]
    fn build_with_manifest() {
        let config = DatasetConfigBuilder::new()
            .name("api")
            .morphology_pattern("m.csv")
            .manifest_path(PathBuf::from("manifest.toml"))
            .unmatched_files(UnmatchedFilePolicy::Skip)
            .build()
            .unwrap();
        assert_eq!(
            config.interactions,
            InteractionSource::Manifest(PathBuf::from("manifest.toml"))
        );
        assert_eq!(config.unmatched_files, UnmatchedFilePolicy::Skip);
    }

    #[test]
    fn build_fails_without_interaction_source() {
        let result = DatasetConfigBuilder::new()
            .name("api")
            .morphology_pattern("m.csv")
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("interactions")));
    }

    #[test]
    fn build_fails_with_both_interaction_sources() {
        let result = DatasetConfigBuilder::new()
            .name("api")
            .morphology_pattern("m.csv")
            .interaction_pattern("*.csv")
            .manifest_path(PathBuf::from("manifest.toml"))
            .build();
        assert_eq!(result, Err(ConfigError::ConflictingInteractionSources));
    }

    #[test]
    fn build_fails_without_morphology() {
        let result = DatasetConfigBuilder::new()
            .name("api")
            .interaction_pattern("*.csv")
            .build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("morphology_pattern"))
        );
    }
}
