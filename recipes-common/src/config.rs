//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Environment variable naming the root data folder
pub const ROOT_FOLDER_ENV: &str = "RECIPES_ROOT_FOLDER";

/// Environment variable holding the classifier API key
pub const CLASSIFIER_KEY_ENV: &str = "RECIPES_CLASSIFIER_KEY";

/// Database file name inside the root folder
const DATABASE_FILE: &str = "recipes.db";

/// Root folder resolution, priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file (`root_folder` key)
/// 4. OS-dependent compiled default (fallback)
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    cli_override: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new() -> Self {
        Self { cli_override: None }
    }

    /// Supply a command-line override (wins over all other sources)
    pub fn with_cli_override(mut self, path: Option<PathBuf>) -> Self {
        self.cli_override = path;
        self
    }

    /// Resolve the root folder path
    pub fn resolve(&self) -> PathBuf {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_override {
            return path.clone();
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        // Priority 3: TOML config file
        if let Ok(config) = load_config_file() {
            if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                return PathBuf::from(root_folder);
            }
        }

        // Priority 4: OS-dependent compiled default
        default_root_folder()
    }
}

impl Default for RootFolderResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Ensures the root folder exists and locates well-known files inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the root folder if it does not exist yet
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Path of the SQLite database inside the root folder
    pub fn database_path(&self) -> PathBuf {
        self.root.join(DATABASE_FILE)
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

/// Classifier API key, from environment or the TOML config file
/// (`classifier_api_key` key). None disables category classification.
pub fn classifier_api_key() -> Option<String> {
    if let Ok(key) = std::env::var(CLASSIFIER_KEY_ENV) {
        if !key.is_empty() {
            return Some(key);
        }
    }

    load_config_file()
        .ok()
        .and_then(|config| {
            config
                .get("classifier_api_key")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        })
        .filter(|s| !s.is_empty())
}

/// Load and parse the configuration file for the platform
fn load_config_file() -> Result<toml::Value> {
    let path = config_file_path()?;
    let content = std::fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Get configuration file path for the platform
fn config_file_path() -> Result<PathBuf> {
    // ~/.config/recipes/config.toml (or the platform equivalent),
    // with /etc/recipes/config.toml as a system-wide fallback on Linux
    if let Some(path) = dirs::config_dir().map(|d| d.join("recipes").join("config.toml")) {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/recipes/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("recipes"))
        .unwrap_or_else(|| PathBuf::from("./recipes_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_override_wins() {
        let resolver = RootFolderResolver::new()
            .with_cli_override(Some(PathBuf::from("/tmp/recipes-test-root")));
        assert_eq!(resolver.resolve(), PathBuf::from("/tmp/recipes-test-root"));
    }

    #[test]
    fn initializer_creates_directory_and_names_database() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("root");

        let initializer = RootFolderInitializer::new(root.clone());
        initializer.ensure_directory_exists().unwrap();

        assert!(root.is_dir());
        assert_eq!(initializer.database_path(), root.join("recipes.db"));
    }
}
