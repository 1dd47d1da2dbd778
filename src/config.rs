use once_cell::sync::Lazy;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Base URL used when nothing else is configured (local development backend).
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

static DEFAULT_CREDENTIALS_PATH: Lazy<PathBuf> = Lazy::new(|| {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("opticini")
        .join("credentials.json")
});

#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub api_url: String,
    pub credentials_path: PathBuf,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialConfig {
    api_url: Option<String>,
    credentials_path: Option<PathBuf>,
}

impl StudioConfig {
    /// Resolve configuration by merging (lowest to highest precedence):
    /// built-in defaults, an optional TOML config file, environment variables.
    pub fn load(config_path: Option<&str>) -> Result<Self, String> {
        dotenv::dotenv().ok();

        let env_config = PartialConfig {
            api_url: env::var("OPTICINI_API_URL").ok(),
            credentials_path: env::var("OPTICINI_CREDENTIALS_PATH").ok().map(PathBuf::from),
        };
        Self::load_with(config_path, env_config)
    }

    // The environment layer is passed in so resolution can be exercised
    // without touching process-wide environment variables.
    fn load_with(config_path: Option<&str>, env_config: PartialConfig) -> Result<Self, String> {
        // 1. Load from file (optional)
        let file_config: PartialConfig = if let Some(path_str) = config_path {
            let path = Path::new(path_str);
            if path.exists() {
                let contents = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read config file at {path:?}: {e}"))?;
                toml::from_str(&contents)
                    .map_err(|e| format!("Failed to parse TOML from config file at {path:?}: {e}"))?
            } else {
                return Err(format!("Config file not found at {path:?}"));
            }
        } else {
            PartialConfig::default()
        };

        // 2. Merge: environment overrides file
        Ok(StudioConfig {
            api_url: env_config
                .api_url
                .or(file_config.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            credentials_path: env_config
                .credentials_path
                .or(file_config.credentials_path)
                .unwrap_or_else(|| DEFAULT_CREDENTIALS_PATH.clone()),
        })
    }
}
