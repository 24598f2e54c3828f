use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use anyhow::{anyhow, Result, Context};
use lazy_static::lazy_static;
use std::sync::RwLock;

use crate::form::{Country, MIN_PASSWORD_LENGTH};

/// Registration form configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FormConfig {
    /// Minimum password length enforced on submit and shown in the strength checklist
    pub min_password_length: usize,
    /// Country selection options, in display order
    #[serde(default)]
    pub countries: Vec<Country>,
}

/// Global application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Application version
    pub version: String,
    /// Form configuration
    pub form: FormConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Registration Form".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            form: FormConfig {
                min_password_length: MIN_PASSWORD_LENGTH,
                countries: ["Canada", "Germany", "Ghana", "India", "United Kingdom", "United States"]
                    .iter()
                    .map(|name| Country::new(name))
                    .collect(),
            },
        }
    }
}

// Global configuration instance
lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::default());
}

/// Load configuration from file into the global config
pub fn load_config(path: &str) -> Result<()> {
    let config = read_config(path)?;
    update_config(config)
}

/// Read configuration from file, writing the defaults out when the file is missing
pub fn read_config(path: &str) -> Result<Config> {
    if !Path::new(path).exists() {
        let default_config = Config::default();
        save_config(path, &default_config)?;
        return Ok(default_config);
    }

    let mut file = File::open(path).context(format!("Failed to open config file: {}", path))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).context("Failed to read config file")?;

    let config: Config = match path.ends_with(".toml") {
        true => toml::from_str(&contents).context("Failed to parse TOML config")?,
        false => serde_json::from_str(&contents).context("Failed to parse JSON config")?,
    };

    Ok(config)
}

/// Save configuration to file
pub fn save_config(path: &str, config: &Config) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
    }

    let serialized = match path.ends_with(".toml") {
        true => toml::to_string_pretty(config).context("Failed to serialize config to TOML")?,
        false => serde_json::to_string_pretty(config).context("Failed to serialize config to JSON")?,
    };

    std::fs::write(path, serialized).context(format!("Failed to write config to file: {}", path))?;

    Ok(())
}

/// Get a copy of the current config
pub fn get_config() -> Config {
    match CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Update the current config
pub fn update_config(config: Config) -> Result<()> {
    if config.form.min_password_length == 0 {
        return Err(anyhow!("form.min_password_length must be at least 1"));
    }

    *CONFIG.write().map_err(|_| anyhow!("Config lock poisoned"))? = config;
    Ok(())
}
