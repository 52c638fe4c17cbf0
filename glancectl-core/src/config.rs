use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment override for the reference data location
pub const REFERENCE_DATA_ENV: &str = "GLANCECTL_REFERENCE_DATA";

const DEFAULT_DOCS_DIR: &str = "docs";
const REFERENCE_DATA_FILE: &str = "reference_data.json";

/// Settings from ~/.glancectl/config.toml. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlanceConfig {
    /// JSON produced by `glancectl scrape`
    pub reference_data: Option<PathBuf>,
    /// Directory holding configuration.md and preconfigured-pages.md
    pub docs_dir: Option<PathBuf>,
    /// Path offered when saving from the editor
    pub default_output: Option<PathBuf>,
}

impl GlanceConfig {
    /// Load config from ~/.glancectl/config.toml, or defaults if it is absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .context(format!("Failed to read config file: {:?}", config_path))?;

        let mut config: Self =
            toml::from_str(&content).context("Failed to parse config file (invalid TOML)")?;
        config.expand_home();
        Ok(config)
    }

    /// Get config file path: ~/.glancectl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".glancectl/config.toml")
    }

    /// Commented template written by `glancectl config init`.
    pub fn template() -> &'static str {
        r#"# glancectl configuration

# Reference data produced by `glancectl scrape`
# reference_data = "~/glance/docs/reference_data.json"

# Directory containing configuration.md and preconfigured-pages.md
# docs_dir = "~/glance/docs"

# Where the editor saves by default
# default_output = "~/glance/glance.yml"
"#
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.docs_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCS_DIR))
    }

    /// Resolution order: explicit override, environment, config file, then
    /// `<docs_dir>/reference_data.json`.
    pub fn reference_data_path(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_override {
            return path.to_path_buf();
        }
        if let Ok(path) = env::var(REFERENCE_DATA_ENV) {
            if !path.trim().is_empty() {
                return expand_tilde(Path::new(path.trim()));
            }
        }
        self.reference_data
            .clone()
            .unwrap_or_else(|| self.docs_dir().join(REFERENCE_DATA_FILE))
    }

    pub fn default_output(&self) -> PathBuf {
        self.default_output
            .clone()
            .unwrap_or_else(|| PathBuf::from("glance.yml"))
    }

    fn expand_home(&mut self) {
        for path in [
            &mut self.reference_data,
            &mut self.docs_dir,
            &mut self.default_output,
        ]
        .into_iter()
        .flatten()
        {
            *path = expand_tilde(path);
        }
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let config = GlanceConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, GlanceConfig::default());
        assert_eq!(config.docs_dir(), PathBuf::from("docs"));
        assert_eq!(
            config.reference_data_path(Some(Path::new("/tmp/ref.json"))),
            PathBuf::from("/tmp/ref.json")
        );
    }

    #[test]
    fn test_load_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "reference_data = \"/data/ref.json\"\ndocs_dir = \"/data/docs\"\n",
        )
        .unwrap();

        let config = GlanceConfig::load_from(&path).unwrap();
        assert_eq!(config.docs_dir(), PathBuf::from("/data/docs"));
        assert_eq!(config.reference_data, Some(PathBuf::from("/data/ref.json")));
        assert_eq!(config.default_output(), PathBuf::from("glance.yml"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "reference_data = [").unwrap();
        assert!(GlanceConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_template_parses() {
        let config: GlanceConfig = toml::from_str(GlanceConfig::template()).unwrap();
        assert_eq!(config, GlanceConfig::default());
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/x.json")), home.join("x.json"));
        }
        assert_eq!(expand_tilde(Path::new("/abs")), PathBuf::from("/abs"));
    }
}
