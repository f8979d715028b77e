//! CLI execution context.

use std::path::{Path, PathBuf};

use admin_session::{FileTokenStore, SessionContext};
use anyhow::{Context as _, Result};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let path = find_config_file(start)?;
        match CliConfig::load(path.to_str()?) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                None
            }
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// The product export to read: the flag if given, else the config.
    pub fn products_file(&self, flag: Option<&str>) -> Option<PathBuf> {
        flag.or(self.config.sources.products_file.as_deref())
            .map(|p| self.resolve_path(p))
    }

    /// The category export to read: the flag if given, else the config.
    pub fn categories_file(&self, flag: Option<&str>) -> Option<PathBuf> {
        flag.or(self.config.sources.categories_file.as_deref())
            .map(|p| self.resolve_path(p))
    }

    /// The customer export to read: the flag if given, else the config.
    pub fn customers_file(&self, flag: Option<&str>) -> Option<PathBuf> {
        flag.or(self.config.sources.customers_file.as_deref())
            .map(|p| self.resolve_path(p))
    }

    /// Session backed by the configured token file.
    pub fn session(&self) -> SessionContext<FileTokenStore> {
        let path = self.resolve_path(&self.config.session.token_file);
        SessionContext::new(FileTokenStore::new(path))
    }
}

/// Nearest config file at or above `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_upward() {
        let root = std::env::temp_dir().join(format!("catalog-cli-ctx-{}", std::process::id()));
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join(".catalog.toml"), "").unwrap();

        assert_eq!(find_config_file(&nested), Some(root.join(".catalog.toml")));

        std::fs::write(nested.join("catalog.json"), "{}").unwrap();
        assert_eq!(find_config_file(&nested), Some(nested.join("catalog.json")));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_sources_prefer_flag() {
        let mut config = CliConfig::default();
        config.sources.products_file = Some("from-config.json".to_string());
        let ctx = Context {
            config,
            output: Output::new(false, true),
            cwd: PathBuf::from("/work"),
        };

        assert_eq!(
            ctx.products_file(None),
            Some(PathBuf::from("/work/from-config.json"))
        );
        assert_eq!(
            ctx.products_file(Some("/abs/flag.json")),
            Some(PathBuf::from("/abs/flag.json"))
        );
        assert_eq!(ctx.categories_file(None), None);
        assert_eq!(
            ctx.customers_file(Some("people.json")),
            Some(PathBuf::from("/work/people.json"))
        );
    }
}
