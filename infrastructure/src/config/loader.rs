//! Configuration file loader with multi-source merging

use super::file_config::{ConfigIssue, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const PROJECT_FILE: &str = "droidmind.toml";
const ENV_PREFIX: &str = "DROIDMIND_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration:\n{}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  - {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority, then
    /// validate it. Warnings are logged; errors fail the load.
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let global = Self::global_config_path();
        let config = Self::load_from(global.as_deref(), Path::new("."), config_path)?;

        let (errors, warnings): (Vec<_>, Vec<_>) =
            config.validate().into_iter().partition(ConfigIssue::is_error);
        for issue in &warnings {
            warn!(field = %issue.field, "{}", issue.message);
        }
        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors));
        }
        Ok(config)
    }

    /// Merge defaults, the global file, `<project_dir>/droidmind.toml`, the
    /// environment and an explicit file, in that order.
    pub fn load_from(
        global: Option<&Path>,
        project_dir: &Path,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global) = global
            && global.exists()
        {
            debug!(path = %global.display(), "Loading global config");
            figment = figment.merge(Toml::file(global));
        }

        let project = project_dir.join(PROJECT_FILE);
        if project.exists() {
            debug!(path = %project.display(), "Loading project config");
            figment = figment.merge(Toml::file(&project));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            debug!(path = %path.display(), "Loading explicit config");
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// `~/.config/droidmind/config.toml` (or the platform equivalent)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("droidmind").join("config.toml"))
    }

    /// The project config file, if present in the working directory
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_FILE);
        path.exists().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.agent.max_iterations, 10);
        assert!(config.tools.is_empty());
    }

    #[test]
    fn test_global_config_path() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some_and(|p| p.to_string_lossy().contains("droidmind")));
    }

    #[test]
    fn test_layering_order() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(
            &global,
            "[agent]\nmax_iterations = 4\n[memory]\nmax_exchanges = 8\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(PROJECT_FILE),
            "[agent]\nmax_iterations = 6\n",
        )
        .unwrap();
        let explicit = dir.path().join("explicit.toml");
        fs::write(&explicit, "[provider]\nmodel = \"llama3\"\n").unwrap();

        let config =
            ConfigLoader::load_from(Some(&global), dir.path(), Some(&explicit)).unwrap();

        assert_eq!(config.agent.max_iterations, 6);
        assert_eq!(config.memory.max_exchanges, 8);
        assert_eq!(config.memory.max_summary_size, 4000);
        assert_eq!(config.provider.model, "llama3");
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = ConfigLoader::load_from(None, dir.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("bad.toml");
        fs::write(&explicit, "[agent]\nmax_iterations = \"many\"\n").unwrap();
        let err = ConfigLoader::load_from(None, dir.path(), Some(&explicit)).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
