use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub emulator: EmulatorConfig,
    pub project: ProjectConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmulatorConfig {
    pub host: String,
    pub port: u16,
}

impl EmulatorConfig {
    /// ## Summary
    /// Returns the emulator address as a string in the format "host:port".
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// ## Summary
    /// Returns the emulator origin URL.
    #[must_use]
    pub fn origin(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub id: String,
    pub rules_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values, and
    /// `FIRESTORE_EMULATOR_HOST` (the convention the emulator tooling itself
    /// sets) takes precedence over everything else.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails,
    /// or if `FIRESTORE_EMULATOR_HOST` is set but not of the form "host:port".
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("emulator.host", "localhost")?
            .set_default("emulator.port", 8080)?
            .set_default("project.id", "test-project")?
            .set_default("project.rules_file", "firestore.rules")?
            .set_default("logging.level", "debug")?
            // Env vars
            .add_source(
                config::Environment::with_prefix("FIRETEST")
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("firetest.toml").required(false));

        if let Ok(address) = std::env::var("FIRESTORE_EMULATOR_HOST") {
            let (host, port) = parse_emulator_address(&address)?;
            builder = builder
                .set_override("emulator.host", host)?
                .set_override("emulator.port", port)?;
        }

        Ok(builder.build()?.try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Splits a "host:port" emulator address into its parts.
///
/// ## Errors
/// Returns an error if the address has no port separator or the port is not
/// a valid number.
pub fn parse_emulator_address(address: &str) -> CoreResult<(String, u16)> {
    let (host, port) = address.rsplit_once(':').ok_or_else(|| {
        CoreError::InvalidConfiguration(format!(
            "Emulator address '{address}' is not of the form host:port"
        ))
    })?;

    if host.is_empty() {
        return Err(CoreError::InvalidConfiguration(format!(
            "Emulator address '{address}' has an empty host"
        )));
    }

    let port = port.parse::<u16>().map_err(|e| {
        CoreError::InvalidConfiguration(format!(
            "Emulator address '{address}' has an invalid port: {e}"
        ))
    })?;

    Ok((host.to_string(), port))
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
