use std::fs;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::cli::{OutputFormat, TimeRange};

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    pub range: Option<TimeRange>,
    pub format: Option<OutputFormat>,
    pub seed: Option<u64>,
}

pub fn load_config() -> Config {
    let Some(dirs) = ProjectDirs::from("", "", "tokdash") else {
        return Config::default();
    };

    let path = dirs.config_dir().join("config.toml");
    let Ok(data) = fs::read_to_string(&path) else {
        return Config::default();
    };

    match toml::from_str(&data) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: invalid config at {}: {}", path.display(), e);
            Config::default()
        }
    }
}
