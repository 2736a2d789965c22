//! # CLI Configuration
//!
//! Environment-based configuration, overridable by command-line flags.

use std::env;

use geoinunda_domain::GeocoderConfig;

/// Geocode CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Geocoding provider settings
    pub geocoder: GeocoderConfig,

    /// Logging level
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = GeocoderConfig::default();

        Self {
            geocoder: GeocoderConfig {
                endpoint: lookup("GEOCODER_URL").unwrap_or(defaults.endpoint),
                region: lookup("GEOCODER_REGION").unwrap_or(defaults.region),
                limit: lookup("GEOCODER_LIMIT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.limit),
                polygon_geometry: lookup("GEOCODER_POLYGONS")
                    .map_or(defaults.polygon_geometry, |v| v == "true" || v == "1"),
                user_agent: lookup("GEOCODER_USER_AGENT").unwrap_or(defaults.user_agent),
            },

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Apply command-line overrides on top of the environment.
    #[must_use]
    pub fn with_overrides(mut self, endpoint: Option<String>, region: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            self.geocoder.endpoint = endpoint;
        }
        if let Some(region) = region {
            self.geocoder.region = region;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.geocoder, GeocoderConfig::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_environment_values() {
        let vars = HashMap::from([
            ("GEOCODER_URL", "http://localhost:8088/search"),
            ("GEOCODER_REGION", "Blumenau, Santa Catarina, Brasil"),
            ("GEOCODER_LIMIT", "3"),
            ("GEOCODER_POLYGONS", "0"),
            ("LOG_LEVEL", "debug"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.geocoder.endpoint, "http://localhost:8088/search");
        assert_eq!(config.geocoder.region, "Blumenau, Santa Catarina, Brasil");
        assert_eq!(config.geocoder.limit, 3);
        assert!(!config.geocoder.polygon_geometry);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_bad_limit_falls_back() {
        let config = Config::from_lookup(|key| (key == "GEOCODER_LIMIT").then(|| "many".into()));
        assert_eq!(config.geocoder.limit, 1);
    }

    #[test]
    fn test_flag_overrides() {
        let config = Config::from_lookup(|_| None)
            .with_overrides(Some("http://127.0.0.1/search".into()), None);
        assert_eq!(config.geocoder.endpoint, "http://127.0.0.1/search");
        assert_eq!(config.geocoder.region, GeocoderConfig::default().region);
    }
}
