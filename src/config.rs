use std::error::Error;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::file;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub socket: Option<String>,
    pub tick_interval_ms: u64,
    pub start_hidden: bool,
    pub indicator_background: [u8; 3],
    pub indicator_foreground: [u8; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            socket: None,
            tick_interval_ms: 100,
            start_hidden: false,
            indicator_background: [16, 185, 129],
            indicator_foreground: [255, 255, 255],
        }
    }
}

impl Config {
    // a missing file yields the defaults and writes them back for editing,
    // a malformed file is a startup error
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        if Path::new(path).exists() {
            file::read_json(path)
        } else {
            let config = Config::default();
            file::write_json(path, &config)?;
            Ok(config)
        }
    }
}
