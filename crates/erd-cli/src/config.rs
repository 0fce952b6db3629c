//! Configuration file loading for the CLI
//!
//! Finds the TOML configuration (explicit path, local directory, platform
//! config directory) and checks it before any rendering starts.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use erd::{ErdError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration `{path}`: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for ErdError {
    fn from(err: ConfigError) -> Self {
        ErdError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (erd/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds invalid values
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ErdError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:? = path; "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("erd/config.toml");
    if local_config.exists() {
        info!(path:? = local_config; "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "erd", "erd") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:? = system_config; "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path:? = system_config; "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ErdError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        reason: err.message().to_string(),
    })?;

    validate(&config)?;
    Ok(config)
}

/// Rejects values that would only fail later, halfway through rendering.
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let style = config.style();
    style.background_color().map_err(ConfigError::Validation)?;
    style.header_color().map_err(ConfigError::Validation)?;
    style.line_color().map_err(ConfigError::Validation)?;

    if style.font_size() == 0 {
        return Err(ConfigError::Validation(
            "style.font_size must be greater than zero".to_string(),
        ));
    }

    let layout = config.layout();
    for (name, value) in [
        ("layout.horizontal_spacing", layout.horizontal_spacing()),
        ("layout.vertical_spacing", layout.vertical_spacing()),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Validation(format!(
                "{name} must be a non-negative number, got {value}"
            )));
        }
    }

    if config.output().path().as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output.path must not be empty".to_string(),
        ));
    }

    Ok(())
}
