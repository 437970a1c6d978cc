use std::env;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{
    DEFAULT_DAS_URL, DEFAULT_DOWNSTREAM, DEFAULT_GENOME_VERSION, DEFAULT_UPSTREAM,
    SEQCHECK_CONFIG_ENV,
};
use crate::models::{BoundaryPolicy, RegionResolver};

///
/// Settings for a seqcheck run. Every key is optional in the TOML file.
///
/// ```toml
/// upstream = 50
/// downstream = 50
/// genome_version = "hg38"
/// trace_decoder = "/opt/tracetuner/bin/ttuner"
/// window_policy = "clamp"
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SeqCheckConfig {
    pub upstream: i64,
    pub downstream: i64,
    pub genome_version: String,
    pub das_url: String,
    pub fasta: Option<PathBuf>,
    pub trace_decoder: Option<PathBuf>,
    pub coordinate_policy: BoundaryPolicy,
    pub window_policy: BoundaryPolicy,
}

impl Default for SeqCheckConfig {
    fn default() -> Self {
        SeqCheckConfig {
            upstream: DEFAULT_UPSTREAM,
            downstream: DEFAULT_DOWNSTREAM,
            genome_version: DEFAULT_GENOME_VERSION.to_string(),
            das_url: DEFAULT_DAS_URL.to_string(),
            fasta: None,
            trace_decoder: None,
            coordinate_policy: BoundaryPolicy::default(),
            window_policy: BoundaryPolicy::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Window sizes must not be negative (upstream={0}, downstream={1})")]
    NegativeWindow(i64, i64),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl SeqCheckConfig {
    ///
    /// Load the config named by `SEQCHECK_CONFIG`, or the defaults when the
    /// variable is unset.
    ///
    pub fn from_env() -> ConfigResult<Self> {
        match env::var(SEQCHECK_CONFIG_ENV) {
            Ok(path) => {
                log::debug!("Loading config from ${}={}", SEQCHECK_CONFIG_ENV, path);
                SeqCheckConfig::try_from(Path::new(&path))
            }
            Err(_) => Ok(SeqCheckConfig::default()),
        }
    }

    ///
    /// Resolver for single positions using this config's windows and
    /// coordinate policy.
    ///
    pub fn resolver(&self) -> RegionResolver {
        RegionResolver::new(self.upstream, self.downstream).with_policy(self.coordinate_policy)
    }

    fn validate(self) -> ConfigResult<Self> {
        if self.upstream < 0 || self.downstream < 0 {
            return Err(ConfigError::NegativeWindow(self.upstream, self.downstream));
        }
        Ok(self)
    }
}

impl TryFrom<&Path> for SeqCheckConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: SeqCheckConfig = toml::from_str(&toml_str)?;
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "{}", contents).expect("Failed to write");
        file
    }

    #[rstest]
    fn test_try_from_toml() {
        let path = PathBuf::from("../tests/data/config/seqcheck.toml");
        let config = SeqCheckConfig::try_from(path.as_path()).unwrap();

        assert_eq!(config.upstream, 50);
        assert_eq!(config.downstream, 30);
        assert_eq!(config.genome_version, "hg38");
        assert_eq!(config.window_policy, BoundaryPolicy::Clamp);
        assert_eq!(
            config.trace_decoder,
            Some(PathBuf::from("/opt/tracetuner/bin/ttuner"))
        );
    }

    #[rstest]
    fn test_missing_keys_use_defaults() {
        let file = write_config("genome_version = \"hg18\"\n");
        let config = SeqCheckConfig::try_from(file.path()).unwrap();

        assert_eq!(config.upstream, DEFAULT_UPSTREAM);
        assert_eq!(config.das_url, DEFAULT_DAS_URL);
        assert_eq!(config.coordinate_policy, BoundaryPolicy::PassThrough);
        assert_eq!(config.fasta, None);
    }

    #[rstest]
    fn test_negative_window_rejected() {
        let file = write_config("upstream = -3\n");
        let result = SeqCheckConfig::try_from(file.path());
        assert!(matches!(result, Err(ConfigError::NegativeWindow(-3, 20))));
    }

    #[rstest]
    fn test_unknown_policy_rejected() {
        let file = write_config("window_policy = \"wrap\"\n");
        let result = SeqCheckConfig::try_from(file.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[rstest]
    fn test_resolver_uses_config() {
        let config = SeqCheckConfig {
            upstream: 2,
            downstream: 3,
            coordinate_policy: BoundaryPolicy::Clamp,
            ..Default::default()
        };
        let range = config.resolver().resolve("1:2").unwrap();
        assert_eq!(range.as_string(), "1:1,5");
    }
}
