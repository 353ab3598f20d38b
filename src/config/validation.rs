use anyhow::{anyhow, Result};
use url::Url;

use crate::config::Settings;

pub fn validate_settings(settings: &Settings) -> Result<()> {
    let endpoint = Url::parse(&settings.daemon.endpoint)
        .map_err(|e| anyhow!("daemon.endpoint {:?} is not a valid URL: {}", settings.daemon.endpoint, e))?;

    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(anyhow!(
            "daemon.endpoint must use http or https, got {}",
            endpoint.scheme()
        ));
    }

    if settings.application.port == 0 {
        return Err(anyhow!("application.port must be non-zero"));
    }

    if settings.daemon.request_id.trim().is_empty() {
        return Err(anyhow!("daemon.request_id must not be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApplicationSettings, DaemonSettings, FrontendSettings};

    fn settings(endpoint: &str, port: u16) -> Settings {
        Settings {
            application: ApplicationSettings {
                port,
                host: "127.0.0.1".to_string(),
                debug: false,
                cors_allow_origin: "*".to_string(),
                cors_allow_methods: "GET".to_string(),
                cors_allow_headers: "Content-Type".to_string(),
            },
            daemon: DaemonSettings {
                endpoint: endpoint.to_string(),
                request_id: "0".to_string(),
            },
            frontend: FrontendSettings::default(),
        }
    }

    #[test]
    fn test_accepts_http_endpoint() {
        assert!(validate_settings(&settings("http://127.0.0.1:32348", 8080)).is_ok());
    }

    #[test]
    fn test_rejects_bad_endpoints() {
        assert!(validate_settings(&settings("127.0.0.1:32348", 8080)).is_err());
        assert!(validate_settings(&settings("ftp://node.local", 8080)).is_err());
    }

    #[test]
    fn test_rejects_zero_port() {
        assert!(validate_settings(&settings("http://127.0.0.1:32348", 0)).is_err());
    }
}
