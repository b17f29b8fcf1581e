use super::defaults::courier_home;
use super::types::{Config, DeskConfig};
use crate::error::{Error, Result};
use crate::tariff::RateTable;
use std::fs;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load() -> Config {
        Config::load().unwrap_or_else(|e| {
            crate::warn_println!("Failed to load config, using defaults: {}", e);
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        })
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Write an editable copy of the builtin tariff dataset, unless one exists
    pub fn export_builtin_rates(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(RateTable::builtin().as_ref())?;
        fs::write(path, content)?;
        Ok(true)
    }
}

impl Config {
    /// Load configuration from default location, then apply env overrides
    pub fn load() -> Result<Config> {
        let config_path = Self::get_config_path();

        let mut config = if config_path.exists() {
            ConfigLoader::load_from_path(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// `COURIER_RATES` and `COURIER_STORE` take precedence over the file
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Blank values are ignored
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(rates) = value("COURIER_RATES") {
            self.rates.path = Some(PathBuf::from(rates));
        }
        if let Some(store) = value("COURIER_STORE") {
            self.store.path = PathBuf::from(store);
        }
    }

    /// Save configuration to default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path (~/.courier/config.toml)
    pub fn get_config_path() -> PathBuf {
        courier_home().join("config.toml")
    }

    /// Create the config directory, an editable tariff dataset and a default config
    pub fn init() -> Result<()> {
        let config_path = Self::get_config_path();

        if config_path.exists() {
            println!("Config already exists at {}", config_path.display());
            return Ok(());
        }

        let rates_path = courier_home().join("rates.json");
        if ConfigLoader::export_builtin_rates(&rates_path)? {
            println!("Created tariff dataset at {}", rates_path.display());
        }

        let mut config = Config::default();
        config.rates.path = Some(rates_path);
        config.save()?;
        println!("Created config at {}", config_path.display());

        Ok(())
    }

    /// Validate configuration, including the configured tariff dataset
    pub fn check(&self) -> Result<()> {
        self.desk.check()?;

        if self.store.path.as_os_str().is_empty() {
            return Err(Error::Config("store path is empty".into()));
        }

        if let Some(path) = &self.rates.path {
            RateTable::load_from_path(path)?.check()?;
        }

        Ok(())
    }

    /// Print configuration as TOML
    pub fn print(&self) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        println!("{}", content);
        Ok(())
    }
}

impl DeskConfig {
    pub fn check(&self) -> Result<()> {
        if self.default_branch.trim().is_empty() {
            return Err(Error::Config("default branch is empty".into()));
        }

        let mut seen = std::collections::HashSet::new();
        for branch in &self.head_office_branches {
            if !seen.insert(branch.as_str()) {
                return Err(Error::Config(format!("Duplicate head office branch: {}", branch)));
            }
        }

        Ok(())
    }

    pub fn is_head_office(&self, branch: &str) -> bool {
        self.head_office_branches.iter().any(|b| b == branch)
    }
}
