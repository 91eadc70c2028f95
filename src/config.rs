use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::{Coordinate, MatchDefaults};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    pub registry: Option<RegistrySettings>,
    #[serde(default)]
    pub synthetic: SyntheticSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Which provider directory backs searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Live,
    Synthetic,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    #[serde(default = "default_source_kind")]
    pub kind: SourceKind,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: default_source_kind(),
        }
    }
}

fn default_source_kind() -> SourceKind { SourceKind::Synthetic }

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fixture setup for the synthetic source
///
/// With `generated` unset the Rome demo directory is used; otherwise that
/// many providers are generated around `center_lat`/`center_lng`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyntheticSettings {
    pub seed: Option<u64>,
    pub generated: Option<usize>,
    pub center_lat: Option<f64>,
    pub center_lng: Option<f64>,
}

impl SyntheticSettings {
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            self.center_lat.unwrap_or(41.9028),
            self.center_lng.unwrap_or(12.4964),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_service_radius_km")]
    pub default_service_radius_km: f64,
    #[serde(default = "default_search_radius_km")]
    pub default_search_radius_km: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_service_radius_km: default_service_radius_km(),
            default_search_radius_km: default_search_radius_km(),
        }
    }
}

impl MatchingSettings {
    pub fn defaults(&self) -> MatchDefaults {
        MatchDefaults {
            service_radius_km: self.default_service_radius_km,
            search_radius_km: self.default_search_radius_km,
        }
    }
}

fn default_service_radius_km() -> f64 { 10.0 }
fn default_search_radius_km() -> f64 { 50.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CG__)
    /// 5. REGISTRY_URL / REGISTRY_API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CG__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        apply_registry_env(settings)?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CG")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Let the conventional REGISTRY_URL and REGISTRY_API_KEY variables
/// override the registry section
fn apply_registry_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(endpoint) = env::var("REGISTRY_URL") {
        builder = builder.set_override("registry.endpoint", endpoint)?;
    }
    if let Ok(api_key) = env::var("REGISTRY_API_KEY") {
        builder = builder.set_override("registry.api_key", api_key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_minimal_settings_use_defaults() {
        let settings = parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            "#,
        );

        assert_eq!(settings.source.kind, SourceKind::Synthetic);
        assert!(settings.registry.is_none());
        assert_eq!(settings.matching.defaults(), MatchDefaults::default());
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.synthetic.center(), Coordinate::new(41.9028, 12.4964));
    }

    #[test]
    fn test_live_settings() {
        let settings = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [source]
            kind = "live"

            [registry]
            endpoint = "https://registry.example.it/v1"
            timeout_secs = 10

            [matching]
            default_search_radius_km = 30.0
            "#,
        );

        assert_eq!(settings.source.kind, SourceKind::Live);
        let registry = settings.registry.unwrap();
        assert_eq!(registry.endpoint, "https://registry.example.it/v1");
        assert_eq!(registry.api_key, None);
        assert_eq!(settings.matching.default_search_radius_km, 30.0);
        assert_eq!(settings.matching.default_service_radius_km, 10.0);
    }
}
