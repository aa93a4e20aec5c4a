use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

pub const API_URL: &str = "https://api.rollout.dev";

/// Overrides the per-user base directory.
pub const HOME_ENV_VAR: &str = "ROLLOUT_HOME";

pub static BASE_DIR: Lazy<PathBuf> = Lazy::new(|| {
    if let Some(home) = env::var_os(HOME_ENV_VAR) {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rollout")
});

pub static CONFIG_DIR: Lazy<PathBuf> = Lazy::new(|| BASE_DIR.join("config"));
