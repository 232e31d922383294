//! Configuration file handling
//!
//! The CLI reads a `studio.toml` holding a [`ViewConfig`]. Command line
//! flags override what the file says.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use studio_view::ViewConfig;

/// Default configuration file name
pub const CONFIG_FILE: &str = "studio.toml";

/// Load `path`, or `studio.toml` in the current directory when it exists,
/// or fall back to defaults
pub fn load(path: Option<&Path>, container_id: &str) -> Result<ViewConfig> {
    let mut config = match path {
        Some(path) => ViewConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None if Path::new(CONFIG_FILE).exists() => ViewConfig::load(Path::new(CONFIG_FILE))
            .with_context(|| format!("Failed to load {}", CONFIG_FILE))?,
        None => ViewConfig::default(),
    };

    if !container_id.is_empty() {
        config.container_id = container_id.to_string();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Write a default configuration file
pub fn write_default(path: &Path, container_id: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let config = ViewConfig::new(container_id);
    let content = format!(
        "# Studioview gallery configuration\n\n{}",
        config.to_toml().context("Failed to serialize config")?
    );
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("studio-cli-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_written_default_loads_back() {
        let path = temp_path("default.toml");
        write_default(&path, "42", true).unwrap();

        let config = load(Some(&path), "").unwrap();
        assert_eq!(config, ViewConfig::new("42"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let path = temp_path("existing.toml");
        write_default(&path, "1", true).unwrap();
        assert!(write_default(&path, "1", false).is_err());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_container_argument_wins() {
        let path = temp_path("override.toml");
        write_default(&path, "1", true).unwrap();

        let config = load(Some(&path), "99").unwrap();
        assert_eq!(config.container_id, "99");

        fs::remove_file(&path).unwrap();
    }
}
