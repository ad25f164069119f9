pub mod settings;

pub use settings::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
pub const APP_DIR: &str = "browser-ctl";

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Failed to get config directory")?
        .join(APP_DIR);

    Ok(config_dir.join("config.toml"))
}

/// Load configuration from the default location, writing defaults on first run
pub fn load_or_create_config() -> Result<Config> {
    let path = config_path()?;

    if path.exists() {
        return load_config_from(&path);
    }

    let config = Config::default();
    match save_config_to(&config, &path) {
        Ok(()) => tracing::info!(path = %path.display(), "created default config"),
        // A read-only config dir must not block opening a tab.
        Err(e) => tracing::warn!(error = %e, "could not write default config"),
    }

    Ok(config)
}

/// Load configuration from an explicit file
pub fn load_config_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// Save configuration to `path`, creating parent directories
pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}
