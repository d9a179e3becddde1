use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use dirs::home_dir;
use meal_engine::EngineConfig;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

pub const HOME_ENV: &str = "MEALBROWSE_HOME";
pub const CONFIG_FILE: &str = "config.toml";

/// Command-line values that win over the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub debounce_ms: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(base_url) = &self.base_url {
            config.catalog.base_url = base_url.clone();
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
    }
}

/// Resolve the engine config: an explicit path must exist; otherwise the
/// default location is used if a file is there, else built-in defaults.
pub fn load(explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<EngineConfig> {
    let mut config = match explicit {
        Some(path) => load_from(path)?,
        None => match default_config_path() {
            Ok(path) if path.is_file() => load_from(&path)?,
            Ok(path) => {
                debug!(path = %path.display(), "no config file, using defaults");
                EngineConfig::default()
            }
            Err(err) => {
                debug!("no config home: {err}");
                EngineConfig::default()
            }
        },
    };
    overrides.apply(&mut config);
    config
        .validate()
        .map_err(|err| anyhow!("invalid configuration: {err}"))?;
    Ok(config)
}

pub fn load_from(path: &Path) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn default_config_path() -> Result<PathBuf> {
    let env_home = std::env::var(HOME_ENV).ok();
    Ok(config_home(env_home.as_deref(), home_dir())?.join(CONFIG_FILE))
}

fn config_home(env_home: Option<&str>, user_home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(env_home) = env_home
        && !env_home.is_empty()
    {
        return Ok(PathBuf::from(env_home));
    }

    let mut home = user_home.ok_or_else(|| anyhow!("Could not locate home directory"))?;
    home.push(".mealbrowse");
    Ok(home)
}
