use serde::Deserialize;
use std::fs;
use std::path::Path;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum line width for wrapped text, rules and banners.
    pub max_width: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { max_width: 80 }
    }
}

impl Config {
    /// The configuration bundled with the crate (`src/default_config.toml`).
    pub fn compiled_default() -> Self {
        // build.rs rejects an invalid default config
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found.
    ///
    /// A file that exists but does not parse also yields defaults.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                log::warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::compiled_default()
            }),
            Err(_) => Self::compiled_default(),
        }
    }

    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.layout.max_width = max_width;
        self
    }

    /// The effective line width; never less than 1.
    pub fn max_width(&self) -> usize {
        self.layout.max_width.max(1)
    }
}
