use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use rhash_core::{AlgorithmSet, Ed2kVariant, HashAlgorithm, HasherOptions, PrintFlags};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Smallest accepted read size
pub const MIN_CHUNK_SIZE: usize = 1024;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub hash: HashConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub io: IoConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct HashConfig {
    /// Algorithms used when none are given on the command line
    pub algorithms: Vec<String>,
    pub ed2k_variant: Ed2kVariant,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputEncoding {
    /// Each algorithm's own default
    #[default]
    Default,
    Hex,
    Base32,
    Base64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub encoding: OutputEncoding,
    pub uppercase: bool,
    pub color_enabled: bool,
    pub progress_enabled: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct IoConfig {
    pub chunk_size: usize,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            algorithms: vec!["crc32".to_string(), "md5".to_string(), "sha1".to_string()],
            ed2k_variant: Ed2kVariant::Red,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            encoding: OutputEncoding::Default,
            uppercase: false,
            color_enabled: true,
            progress_enabled: true,
        }
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            chunk_size: 64 * 1024,
        }
    }
}

impl HashConfig {
    /// Resolve the configured algorithm names
    pub fn algorithm_set(&self) -> Result<AlgorithmSet> {
        parse_algorithms(&self.algorithms)
    }

    pub fn hasher_options(&self) -> HasherOptions {
        HasherOptions {
            ed2k_variant: self.ed2k_variant,
        }
    }
}

impl OutputConfig {
    pub fn print_flags(&self) -> PrintFlags {
        let flags = match self.encoding {
            OutputEncoding::Default => PrintFlags::DEFAULT,
            OutputEncoding::Hex => PrintFlags::HEX,
            OutputEncoding::Base32 => PrintFlags::BASE32,
            OutputEncoding::Base64 => PrintFlags::BASE64,
        };
        if self.uppercase {
            flags | PrintFlags::UPPERCASE
        } else {
            flags
        }
    }
}

impl AppConfig {
    /// Reject values that would make every command fail later
    pub fn validate(&self) -> Result<()> {
        if self.io.chunk_size < MIN_CHUNK_SIZE {
            anyhow::bail!("io.chunk_size must be at least {MIN_CHUNK_SIZE} bytes");
        }
        let algorithms = self
            .hash
            .algorithm_set()
            .context("Invalid hash.algorithms")?;
        if algorithms.is_empty() {
            anyhow::bail!("hash.algorithms must name at least one algorithm");
        }
        Ok(())
    }
}

/// Parse algorithm names (case-insensitive, `sha-256` or `sha256` style)
pub fn parse_algorithms<S: AsRef<str>>(names: &[S]) -> Result<AlgorithmSet> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            name.parse::<HashAlgorithm>()
                .map_err(|_| anyhow::anyhow!("Unknown hash algorithm '{name}'"))
        })
        .collect()
}

/// Configuration manager that handles platform paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("rhash/config.toml");
        }

        dirs::config_dir()
            .map(|dir| dir.join("rhash").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".rhash/config.toml"))
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    ///
    /// Command-line flags are applied on top by the caller.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment = figment.merge(Env::prefixed("RHASH_").split("__"));

        let config: AppConfig = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.load()?;
        let value: toml::Value = toml::from_str(&toml::to_string(&config)?)?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        match current {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Integer(i) => Ok(i.to_string()),
            toml::Value::Boolean(b) => Ok(b.to_string()),
            toml::Value::Array(items) => Ok(items
                .iter()
                .filter_map(|item| item.as_str())
                .collect::<Vec<_>>()
                .join(",")),
            _ => anyhow::bail!("Value at '{}' is not a simple type", key),
        }
    }

    /// Set a configuration value by key (dot notation) in the config file
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed = Self::parse_config_value(key, value)?;

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            toml::from_str(&content)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let parts: Vec<&str> = key.split('.').collect();
        let (last, sections) = parts
            .split_last()
            .ok_or_else(|| anyhow::anyhow!("Empty key"))?;

        let mut current = &mut config;
        for part in sections {
            let toml::Value::Table(table) = current else {
                anyhow::bail!("Invalid key path: expected table at '{}'", part);
            };
            if !table.contains_key(*part) {
                table.insert(part.to_string(), toml::Value::Table(toml::map::Map::new()));
            }
            current = table
                .get_mut(*part)
                .ok_or_else(|| anyhow::anyhow!("Invalid key path: {}", key))?;
        }
        let toml::Value::Table(table) = current else {
            anyhow::bail!("Cannot set value on non-table");
        };
        table.insert(last.to_string(), parsed);

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config_path, toml::to_string_pretty(&config)?)?;
        Ok(())
    }

    /// Validate and convert a value for one of the known keys
    fn parse_config_value(key: &str, value: &str) -> Result<toml::Value> {
        match key {
            "hash.algorithms" => {
                let names: Vec<&str> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .collect();
                if parse_algorithms(&names)?.is_empty() {
                    anyhow::bail!("hash.algorithms must name at least one algorithm");
                }
                Ok(toml::Value::Array(
                    names
                        .into_iter()
                        .map(|name| toml::Value::String(name.to_string()))
                        .collect(),
                ))
            }
            "hash.ed2k_variant" => {
                value.parse::<Ed2kVariant>().map_err(anyhow::Error::msg)?;
                Ok(toml::Value::String(value.to_ascii_lowercase()))
            }
            "output.encoding" => {
                let encoding = value.to_ascii_lowercase();
                if !matches!(encoding.as_str(), "default" | "hex" | "base32" | "base64") {
                    anyhow::bail!("encoding must be one of default, hex, base32, base64");
                }
                Ok(toml::Value::String(encoding))
            }
            "output.uppercase" | "output.color_enabled" | "output.progress_enabled" => {
                let flag: bool = value.parse().context("Value must be 'true' or 'false'")?;
                Ok(toml::Value::Boolean(flag))
            }
            "io.chunk_size" => {
                let size: usize = value
                    .parse()
                    .context("chunk_size must be a positive integer")?;
                if size < MIN_CHUNK_SIZE {
                    anyhow::bail!("chunk_size must be at least {MIN_CHUNK_SIZE} bytes");
                }
                Ok(toml::Value::Integer(i64::try_from(size)?))
            }
            _ => anyhow::bail!("Unknown configuration key '{key}'"),
        }
    }
}
