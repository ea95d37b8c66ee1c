use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::llm::openai::DEFAULT_API_BASE_URL;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Project-local config file, looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".kommitrc.toml";

pub const DEFAULT_COMMIT_TYPES: [&str; 11] = [
    "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

/// Final resolved configuration for kommit.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub llm: LlmConfig,
    pub commit: CommitConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub model: String,
    pub api_base_url: String,
}

/// Allowed commit types and scopes, in the order they are offered to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitConfig {
    pub types: Vec<String>,
    pub scopes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config::from(FileConfig::default())
    }
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence for the model:
    ///   1. `model_override` (`--model` or `KOMMIT_MODEL`)
    ///   2. `[llm] model` in the config file
    ///   3. Hardcoded default ("gpt-4o-mini")
    ///
    /// The file is `explicit_path` when given (and must be readable), otherwise
    /// `./.kommitrc.toml`, then `~/.config/kommit.toml`.
    pub fn from_sources(explicit_path: Option<&Path>, model_override: Option<String>) -> Result<Self> {
        let file_cfg = match explicit_path {
            Some(path) => load_file_config(path)?,
            None => match default_config_path() {
                Some(path) => {
                    log::debug!("Loading config from {}", path.display());
                    load_file_config(&path)?
                }
                None => FileConfig::default(),
            },
        };

        let mut config = Config::from(file_cfg);
        if let Some(model) = model_override {
            config.llm.model = model;
        }

        Ok(config)
    }

    pub fn from_toml_str(data: &str) -> Result<Self> {
        let file_cfg: FileConfig = toml::from_str(data).context("invalid kommit config")?;
        Ok(Config::from(file_cfg))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    llm: FileLlmConfig,
    #[serde(default)]
    commit: FileCommitConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileLlmConfig {
    model: Option<String>,
    api_base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileCommitConfig {
    types: Option<Vec<String>>,
    scopes: Option<Vec<String>>,
}

impl From<FileConfig> for Config {
    fn from(file: FileConfig) -> Self {
        Config {
            llm: LlmConfig {
                model: file.llm.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_base_url: file
                    .llm
                    .api_base_url
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            },
            commit: CommitConfig {
                types: file.commit.types.unwrap_or_else(|| {
                    DEFAULT_COMMIT_TYPES.iter().map(|t| t.to_string()).collect()
                }),
                scopes: file.commit.scopes.unwrap_or_default(),
            },
        }
    }
}

/// `./.kommitrc.toml` if present, else `~/.config/kommit.toml` if present.
fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    let home = dirs::home_dir()?.join(".config").join("kommit.toml");
    home.exists().then_some(home)
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&data).with_context(|| format!("invalid kommit config in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.llm.model, DEFAULT_MODEL);
        assert_eq!(cfg.llm.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.commit.types.len(), DEFAULT_COMMIT_TYPES.len());
        assert!(cfg.commit.scopes.is_empty());
    }

    #[test]
    fn file_values_keep_their_order() {
        let cfg = Config::from_toml_str(
            r#"
            [llm]
            model = "gpt-4.1"

            [commit]
            types = ["fix", "feat"]
            scopes = ["llm", "cli"]
            "#,
        )
        .unwrap();

        assert_eq!(cfg.llm.model, "gpt-4.1");
        assert_eq!(cfg.commit.types, ["fix", "feat"]);
        assert_eq!(cfg.commit.scopes, ["llm", "cli"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml_str("[llm]\ntemperature = 1.0\n").is_err());
    }

    #[test]
    fn model_override_beats_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm]\nmodel = \"from-file\"").unwrap();

        let cfg = Config::from_sources(Some(file.path()), Some("from-flag".into())).unwrap();
        assert_eq!(cfg.llm.model, "from-flag");

        let cfg = Config::from_sources(Some(file.path()), None).unwrap();
        assert_eq!(cfg.llm.model, "from-file");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::from_sources(Some(Path::new("/nonexistent/kommit.toml")), None).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
