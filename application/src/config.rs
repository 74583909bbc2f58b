//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// [Supabase] project configuration.
    ///
    /// [Supabase]: https://supabase.com
    pub supabase: Supabase,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the `CONF.`-prefixed environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// Maximum size (in bytes) of an uploaded image.
    #[default(10 * 1024 * 1024)]
    pub max_image_size: usize,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// Storage bucket the vehicle images are uploaded into.
    #[default("carimages".to_owned())]
    pub images_bucket: String,
}

/// [Supabase] project configuration.
///
/// [Supabase]: https://supabase.com
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Supabase {
    /// Base URL of the project.
    #[default("http://127.0.0.1:54321".to_owned())]
    pub url: String,

    /// Public (anon) API key of the project.
    pub api_key: String,

    /// [JWT] secret the access tokens of the project are signed with.
    ///
    /// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
    #[default("secret".to_owned())]
    pub jwt_secret: String,

    /// Timeout of a single request to the project.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl Supabase {
    /// Splits this [`Supabase`] configuration into the [`service::Config`]
    /// (completed with the provided [`Service`] section) and the client
    /// configuration.
    #[must_use]
    pub fn split(
        self,
        service: Service,
    ) -> (service::Config, service::infra::supabase::Config) {
        let Self {
            url,
            api_key,
            jwt_secret,
            timeout,
        } = self;
        let Service { images_bucket } = service;

        (
            service::Config {
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    jwt_secret.as_bytes(),
                ),
                images_bucket,
            },
            service::infra::supabase::Config {
                url,
                api_key,
                timeout,
            },
        )
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
