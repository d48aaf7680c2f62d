//! Process configuration, loaded once at startup.
//!
//! Everything comes from the environment with sane defaults, except the token
//! signing secret which may also live in a container secrets file. The secret
//! is held as raw bytes, handed to the token codec once, and never logged.

use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub http_port: u16,
    pub redis_url: String,
    pub token_secret: Vec<u8>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            http_port: try_load("STORERATE_HTTP_PORT", "5000"),
            redis_url: try_load("STORERATE_REDIS_URL", "redis://127.0.0.1:6379"),
            token_secret: read_secret("STORERATE_TOKEN_SECRET").into_bytes(),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

/// Load a secret from the environment, falling back to the conventional
/// `/run/secrets/<NAME>` path used by container deployments.
fn read_secret(secret_name: &str) -> String {
    if let Ok(v) = env::var(secret_name) {
        let v = v.trim().to_string();
        if !v.is_empty() {
            return v;
        }
    }
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
        })
        .expect("Secrets misconfigured!")
}
