//! Configuration management for the Pilosa client
use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use serde::Deserialize;
use serde::Deserializer;
use std::path::Path;
use url::Url;

const DEFAULT_CONFIG: &str = include_str!("config/default.toml");

/// Top-level configuration for the client
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    /// Pilosa server configuration
    pub pilosa: PilosaConfig,
}

/// Where the Pilosa server lives
#[derive(Deserialize, Clone, Debug)]
pub struct PilosaConfig {
    /// Base URL of the server
    #[serde(deserialize_with = "url_deserializer_single")]
    pub url: Url,
}

/// A deserializer for the url::Url type. Does not support deserializing a list,
/// only a single URL.
fn url_deserializer_single<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer)?
        .parse()
        .map_err(serde::de::Error::custom)
}

impl PilosaConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.url.scheme(), "http" | "https") {
            return Err(ConfigError::Message(format!(
                "[pilosa] url scheme must be 'http' or 'https', got '{}'",
                self.url.scheme()
            )));
        }
        if self.url.host().is_none() {
            return Err(ConfigError::Message(
                "[pilosa] url must include a host".to_string(),
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Initializing the config with the embedded default values, then the
    /// optional config file, then environment variables.
    ///
    /// The explicit separator with double underscores is needed to correctly
    /// parse the nested config structure, e.g. `PILOSA_CLIENT__PILOSA__URL`.
    pub fn new(config_path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix("PILOSA_CLIENT").separator("__");

        let mut cfg_builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        cfg_builder = cfg_builder.add_source(env);

        let cfg = cfg_builder.build()?;

        let settings: Settings = cfg.try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    /// Load the defaults, overridden only by the environment.
    pub fn new_from_default_config() -> Result<Self, ConfigError> {
        Self::new(None::<&Path>)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.pilosa.validate()
    }
}
