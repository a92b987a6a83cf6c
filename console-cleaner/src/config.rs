use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::{ALT_CONFIG_FILENAME, CONFIG_FILENAME};
use crate::dialect::FrontmatterFallback;
use crate::engine::Granularity;
use crate::policy::MatchMode;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default, rename = "console-cleaner")]
    /// The `[console-cleaner]` table.
    pub cleaner: CleanerConfig,
    /// The path to the configuration file this was loaded from.
    /// `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
/// Configuration options for a cleaning run.
pub struct CleanerConfig {
    /// Console members whose calls are removed.
    pub methods: Option<Vec<String>>,
    /// Remove calls to every console member.
    pub all_methods: Option<bool>,
    /// Removal granularity.
    pub granularity: Option<Granularity>,
    /// Policy for frontmatter documents without markers.
    pub frontmatter_fallback: Option<FrontmatterFallback>,
    /// Active framework integrations (e.g. `vue`).
    pub integrations: Option<Vec<String>>,
    /// Extra ignore tokens.
    pub exclude: Option<Vec<String>>,
    /// Whether the built-in ignore tokens apply.
    pub default_ignore: Option<bool>,
    /// File-name patterns to accept, replacing the defaults.
    #[serde(rename = "match")]
    pub match_patterns: Option<Vec<String>>,
    /// How `match` patterns are compared.
    pub match_mode: Option<MatchMode>,
    /// Whether `.gitignore` files are honoured.
    pub respect_gitignore: Option<bool>,
    /// Worker threads.
    pub jobs: Option<usize>,
}

impl Config {
    /// Loads configuration from the current directory upwards.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// The first directory holding a readable, well-formed config file
    /// wins; malformed files are reported and skipped.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if current.is_file() {
            current.pop();
        }

        loop {
            for name in [CONFIG_FILENAME, ALT_CONFIG_FILENAME] {
                let candidate = current.join(name);
                if !candidate.is_file() {
                    continue;
                }
                match Self::load_file(&candidate) {
                    Ok(config) => {
                        debug!("using config {}", candidate.display());
                        return config;
                    }
                    Err(e) => warn!("ignoring config {}: {e:#}", candidate.display()),
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }

    /// Loads an explicit configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    /// for this schema.
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?;
        config.config_file_path = Some(path.to_path_buf());
        Ok(config)
    }
}
