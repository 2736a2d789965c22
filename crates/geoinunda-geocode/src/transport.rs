//! `reqwest` transport for the geocode client.

use geoinunda_domain::{GeocodeError, GeocodeRequest, GeocodeTransport, GeocoderConfig, Place};
use reqwest::Client;

/// Sends geocode lookups over a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport identifying itself with the configured user agent.
    ///
    /// # Errors
    ///
    /// Fails if the underlying TLS backend cannot be initialised.
    pub fn new(config: &GeocoderConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self { client })
    }
}

impl GeocodeTransport for ReqwestTransport {
    async fn search(&self, request: &GeocodeRequest) -> Result<Vec<Place>, GeocodeError> {
        let response = self
            .client
            .get(&request.endpoint)
            .query(&request.params)
            .send()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Transport(format!(
                "provider returned status {status}"
            )));
        }

        response
            .json::<Vec<Place>>()
            .await
            .map_err(|e| GeocodeError::Malformed(e.to_string()))
    }
}
