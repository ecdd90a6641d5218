use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use portal_engine::ApiSettings;

use super::logging::LogDestination;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_SESSION_FILE: &str = "./.portal_session.ron";

/// Runtime configuration, read from the environment (and `.env` if present).
#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    pub api_url: String,
    pub session_file: PathBuf,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub log_destination: LogDestination,
}

impl PortalConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let log_destination = match lookup("PORTAL_LOG") {
            Some(raw) => raw
                .parse()
                .map_err(|err: String| anyhow!(err))
                .context("PORTAL_LOG")?,
            None => LogDestination::default(),
        };
        Ok(PortalConfig {
            api_url: lookup("PORTAL_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            session_file: lookup("PORTAL_SESSION_FILE")
                .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from),
            connect_timeout: seconds(&lookup, "PORTAL_CONNECT_TIMEOUT_SECS", 10)?,
            request_timeout: seconds(&lookup, "PORTAL_REQUEST_TIMEOUT_SECS", 30)?,
            log_destination,
        })
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_url.clone(),
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
            ..ApiSettings::default()
        }
    }
}

fn seconds(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<Duration> {
    let Some(raw) = lookup(key) else {
        return Ok(Duration::from_secs(default));
    };
    let secs = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("{key} must be a whole number of seconds"))?;
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<PortalConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PortalConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.session_file, PathBuf::from("./.portal_session.ron"));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_destination, LogDestination::File);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("PORTAL_API_URL", "https://hire.example.com/api"),
            ("PORTAL_REQUEST_TIMEOUT_SECS", "5"),
            ("PORTAL_LOG", "both"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "https://hire.example.com/api");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.api_settings().page_size, 3);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = config(&[("PORTAL_CONNECT_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("PORTAL_CONNECT_TIMEOUT_SECS"));
    }
}
