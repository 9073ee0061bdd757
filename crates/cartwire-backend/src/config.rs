use std::path::PathBuf;

use cartwire_bridge::config::Config;
use directories::ProjectDirs;
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

/// Errors that can occur while loading application configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to determine the user's configuration directory. This usually
    /// occurs when required environment variables are missing (e.g., `$HOME`
    /// on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the configuration file.
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid TOML or does not match the expected structure.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
    /// Failed to serialize the default configuration to TOML.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

fn config_path() -> Result<PathBuf, ConfigError> {
    match ProjectDirs::from("dev", "cartwire", "cartwire") {
        Some(dirs) => Ok(dirs.config_dir().join("config.toml")),
        None => Err(ConfigError::DirectoriesNotFound),
    }
}

/// Loads the application configuration from disk, writing the defaults out
/// first if no configuration file exists yet.
pub async fn load_config() -> Result<Config, ConfigError> {
    let config_path = config_path()?;
    log::info!("Loading configuration from {config_path:?}");
    load_config_from(config_path).await
}

async fn load_config_from(config_path: PathBuf) -> Result<Config, ConfigError> {
    if config_path.exists() {
        let contents = read_to_string(config_path).await?;
        let config: Config = toml::from_str(&contents)?;
        return Ok(config);
    }

    let config = Config::default();
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(&config)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(config_path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("cartwire-config-{}-{name}", std::process::id()))
            .join("config.toml")
    }

    #[tokio::test]
    async fn writes_defaults_when_missing() -> TestResult {
        let path = scratch_path("defaults");
        let _ = std::fs::remove_file(&path);

        let config = load_config_from(path.clone()).await?;

        assert_eq!(config, Config::default());
        assert!(path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn reads_existing_file() -> TestResult {
        let path = scratch_path("existing");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, "base_url = \"https://shop.example\"\n")?;

        let config = load_config_from(path).await?;

        assert_eq!(config.base_url, "https://shop.example");
        Ok(())
    }

    #[tokio::test]
    async fn rejects_malformed_file() -> TestResult {
        let path = scratch_path("malformed");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, "base_url = [")?;

        let result = load_config_from(path).await;

        assert!(matches!(result, Err(ConfigError::DeserializeError(_))));
        Ok(())
    }
}
