pub mod loader;
pub mod rules;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

pub use rules::RulesConfig;

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Fixed seed for reproducible figure arrivals
    pub seed: Option<u64>,
    pub rules: RulesConfig,
}

impl Config {
    // Load from the usual location, falling back to defaults on any error
    #[must_use]
    pub fn load() -> Self {
        match loader::load_config_from_file() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load configuration, using defaults: {e}");
                Self::default()
            }
        }
    }
}
