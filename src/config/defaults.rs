use super::types::{Config, DeskConfig, RatesConfig, StoreConfig};
use std::path::PathBuf;

pub const DEFAULT_BRANCH: &str = "Main Branch";
pub const HEAD_OFFICE_BRANCHES: [&str; 2] = ["Headquarters", "Main Branch"];

/// Base directory for config and data (~/.courier/)
pub fn courier_home() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        home.join(".courier")
    } else {
        PathBuf::from(".courier")
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: courier_home().join("consignments.json"),
        }
    }
}

impl Default for DeskConfig {
    fn default() -> Self {
        DeskConfig {
            default_branch: DEFAULT_BRANCH.to_string(),
            head_office_branches: HEAD_OFFICE_BRANCHES.iter().map(|b| b.to_string()).collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rates: RatesConfig::default(),
            store: StoreConfig::default(),
            desk: DeskConfig::default(),
        }
    }
}
