use std::env;
use std::env::current_dir;
use std::fmt::Display;
use std::time::Duration;

use config::Config;
use config::ConfigError;
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::presign_client::PresignClient;

/// Global configuration, loaded from `configuration/*.yaml`. See
/// `get_configuration`.
#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub presign_endpoint: PresignEndpointSettings,
}

/// Server configuration
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    /// Should be localhost on dev machine, 0.0.0.0 on prod
    pub host: String,

    /// Port for the server; 0 lets the OS pick one (tests)
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,

    /// Signs the flash message cookie. Must be at least 64 bytes long.
    pub hmac_secret: Secret<String>,
}

/// Where to exchange an email for a presigned url
#[derive(Deserialize, Clone)]
pub struct PresignEndpointSettings {
    pub url: String,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl PresignEndpointSettings {
    pub fn timeout(&self) -> Duration { Duration::from_millis(self.timeout_milliseconds) }

    pub fn client(&self) -> Result<PresignClient, reqwest::Error> {
        PresignClient::new(self.url.clone(), self.timeout())
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Display for Environment {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Environment::Local => "local",
                Environment::Production => "production",
            }
        )
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            e => Err(format!(
                "{e} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}

/// Load yaml configuration files at `<project_root>/configuration`:
/// `base.yaml`, then `local.yaml` or `production.yaml` depending on
/// `APP_ENVIRONMENT` (default: local), then `APP_`-prefixed env vars.
///
/// All fields must be present after merging, otherwise initialisation fails
/// immediately, and the server does not start.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let cfg_dir = current_dir()
        .map_err(|e| ConfigError::Foreign(Box::new(e)))?
        .join("configuration");

    let env: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or("local".to_string())
        .try_into()
        .map_err(ConfigError::Message)?;

    let settings = Config::builder()
        .add_source(config::File::from(cfg_dir.join("base.yaml")))
        .add_source(config::File::from(cfg_dir.join(format!("{env}.yaml"))))
        .add_source(
            // env vars are -always- parsed as String, hence `serde-aux` for the
            // numeric fields
            //
            // `APP_APPLICATION__PORT=5001` -> `Settings.application.port`
            // `APP_PRESIGN_ENDPOINT__URL=https://...` -> `Settings.presign_endpoint.url`
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
