//! Configuration management.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use spahau_core::{QueryConfig, DEFAULT_MAX_ANSWERS, DEFAULT_ZONE};

use crate::output::OutputFormat;

/// CLI configuration file contents.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// DNSBL zone to query.
    pub domain: Option<String>,

    /// Cap on address records examined per lookup.
    pub max_answers: Option<usize>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "spahau", "spahau")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("could not parse {}", path.display()))?;

        if config.max_answers == Some(0) {
            anyhow::bail!("{}: max_answers must be at least 1", path.display());
        }

        Ok(config)
    }

    /// Merge command-line overrides into the query settings.
    ///
    /// Command line (including `SPAHAU_DOMAIN`) wins over the file, the
    /// file wins over built-in defaults.
    #[must_use]
    pub fn query_config(&self, domain: Option<String>, max_answers: Option<usize>) -> QueryConfig {
        QueryConfig::default()
            .domain(
                domain
                    .or_else(|| self.domain.clone())
                    .unwrap_or_else(|| DEFAULT_ZONE.to_string()),
            )
            .max_answers(
                max_answers
                    .or(self.max_answers)
                    .unwrap_or(DEFAULT_MAX_ANSWERS),
            )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file() {
        let query = Config::default().query_config(None, None);
        assert_eq!(query.domain, "zen.spamhaus.org");
        assert_eq!(query.max_answers, 15);
    }

    #[test]
    fn file_values_are_used() {
        let file = write_config("domain = \"bl.example.org\"\nmax_answers = 4\noutput_format = \"json\"\n");
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.output_format, Some(OutputFormat::Json));

        let query = config.query_config(None, None);
        assert_eq!(query.domain, "bl.example.org");
        assert_eq!(query.max_answers, 4);
    }

    #[test]
    fn command_line_wins() {
        let config = Config {
            domain: Some("bl.example.org".into()),
            max_answers: Some(4),
            output_format: None,
        };
        let query = config.query_config(Some("dnsbl.example.net".into()), Some(8));
        assert_eq!(query.domain, "dnsbl.example.net");
        assert_eq!(query.max_answers, 8);
    }

    #[test]
    fn rejects_bad_files() {
        assert!(Config::load_from(write_config("max_answers = 0\n").path()).is_err());
        assert!(Config::load_from(write_config("zone = \"x\"\n").path()).is_err());
        assert!(Config::load_from(Path::new("/nonexistent/spahau.toml")).is_err());
    }
}
