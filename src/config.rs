use anyhow::{anyhow, Context, Result};
use argon2::Argon2;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rocket::figment::Figment;
use rocket::fs::relative;
use std::env;

/// Fixed salt for deriving the cookie key. The secret itself carries the entropy.
const SECRET_KEY_SALT: &[u8] = b"taskmanager.secret_key";

/// Runtime configuration, read from the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection string (`DB_URL`, falling back to `DATABASE_URL`)
    pub database_url: String,
    /// `SECRET_KEY`, any passphrase
    pub secret_key: Option<String>,
    /// `IP`
    pub address: Option<String>,
    /// `PORT`
    pub port: Option<u16>,
    /// `DEBUG`
    pub debug: bool,
}

impl AppConfig {
    /// Reads the configuration from environment variables.
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DB_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .filter(|url| !url.is_empty())
            .ok_or_else(|| anyhow!("DB_URL (or DATABASE_URL) must be set"))?;

        let port = lookup("PORT")
            .map(|p| p.parse::<u16>().with_context(|| format!("PORT is not a valid port: {p}")))
            .transpose()?;

        Ok(Self {
            database_url,
            secret_key: lookup("SECRET_KEY").filter(|s| !s.is_empty()),
            address: lookup("IP").filter(|s| !s.is_empty()),
            port,
            debug: lookup("DEBUG").map(|v| is_truthy(&v)).unwrap_or(false),
        })
    }

    /// A configuration for the given database with everything else defaulted.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            secret_key: None,
            address: None,
            port: None,
            debug: false,
        }
    }

    /// Rocket configuration: `Rocket.toml` and `ROCKET_*` first, then our values on top.
    pub fn figment(&self) -> Result<Figment> {
        self.figment_over(rocket::Config::figment())
    }

    /// Merges the values that are set over `base`. Unset values leave `base` alone.
    pub fn figment_over(&self, base: Figment) -> Result<Figment> {
        let mut figment = base.merge(("template_dir", relative!("templates")));

        if self.debug {
            figment = figment.merge(("log_level", "debug"));
        }

        if let Some(address) = &self.address {
            figment = figment.merge(("address", address.as_str()));
        }
        if let Some(port) = self.port {
            figment = figment.merge(("port", port));
        }
        if let Some(secret) = &self.secret_key {
            figment = figment.merge(("secret_key", derive_secret_key(secret)?));
        }

        Ok(figment)
    }
}

/// Stretches an arbitrary passphrase into the 256-bit base64 key Rocket expects.
pub fn derive_secret_key(secret: &str) -> Result<String> {
    let mut key = [0u8; 32];
    Argon2::default()
        .hash_password_into(secret.as_bytes(), SECRET_KEY_SALT, &mut key)
        .map_err(|e| anyhow!("Failed to derive secret key: {}", e))?;
    Ok(STANDARD.encode(key))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
