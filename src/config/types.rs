use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Desk configuration, stored as TOML at `~/.courier/config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rates: RatesConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub desk: DeskConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatesConfig {
    /// Tariff dataset (JSON); the builtin dataset is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Consignment store (JSON file)
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Branch stamped on bookings when the operator has none
    pub default_branch: String,
    /// Operators at these branches may report across all branches
    pub head_office_branches: Vec<String>,
}
