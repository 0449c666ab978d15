//! Application settings loaded via OrthoConfig.
//!
//! Values come from `CONCREDS_*` environment variables, configuration files,
//! and command-line flags, in the order OrthoConfig layers them. Every field
//! is optional; accessors apply the defaults.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{
    CheckSettings, DEFAULT_LOOKUP_DELAY, DEFAULT_MAX_VIEWERS, ParseResolutionPolicyError,
    ResolutionPolicy,
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The host is not an IP address.
    #[error("invalid host '{host}': {source}")]
    InvalidHost {
        /// Configured host.
        host: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// The resolution policy name is unknown.
    #[error(transparent)]
    InvalidResolution(#[from] ParseResolutionPolicyError),
}

/// Configuration values for the HTTP server and the credit check.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONCREDS")]
pub struct AppSettings {
    /// Interface address to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Simulated lookup latency in milliseconds.
    pub lookup_delay_ms: Option<u64>,
    /// `latest-submission` or `last-resolved`.
    pub resolution: Option<String>,
    /// Upper bound on tracked browser sessions.
    pub max_viewers: Option<usize>,
}

impl AppSettings {
    /// Socket address the server binds to.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidHost`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|source| SettingsError::InvalidHost {
            host: host.to_owned(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Latency applied before every lookup.
    pub fn lookup_delay(&self) -> Duration {
        self.lookup_delay_ms
            .map_or(DEFAULT_LOOKUP_DELAY, Duration::from_millis)
    }

    /// Handling of lookups superseded by a newer submission.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidResolution`] for unknown names.
    pub fn resolution(&self) -> Result<ResolutionPolicy, SettingsError> {
        match self.resolution.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(ResolutionPolicy::default()),
        }
    }

    /// Controller tunables derived from these settings.
    ///
    /// # Errors
    /// Propagates [`AppSettings::resolution`] failures.
    pub fn check_settings(&self) -> Result<CheckSettings, SettingsError> {
        Ok(CheckSettings {
            lookup_delay: self.lookup_delay(),
            resolution: self.resolution()?,
        })
    }

    /// Capacity of the viewer registry.
    pub fn max_viewers(&self) -> usize {
        self.max_viewers.unwrap_or(DEFAULT_MAX_VIEWERS)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings loading.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "CONCREDS_HOST",
        "CONCREDS_PORT",
        "CONCREDS_LOOKUP_DELAY_MS",
        "CONCREDS_RESOLUTION",
        "CONCREDS_MAX_VIEWERS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("concreds")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(
            settings.check_settings().expect("default policy"),
            CheckSettings::default()
        );
        assert_eq!(settings.max_viewers(), DEFAULT_MAX_VIEWERS);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CONCREDS_HOST", Some("127.0.0.1".to_owned())),
            ("CONCREDS_PORT", Some("9000".to_owned())),
            ("CONCREDS_LOOKUP_DELAY_MS", Some("250".to_owned())),
            ("CONCREDS_RESOLUTION", Some("last-resolved".to_owned())),
            ("CONCREDS_MAX_VIEWERS", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("configured address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("literal address")
        );
        let check = settings.check_settings().expect("configured policy");
        assert_eq!(check.lookup_delay, Duration::from_millis(250));
        assert_eq!(check.resolution, ResolutionPolicy::LastResolved);
        assert_eq!(settings.max_viewers(), 3);
    }

    #[rstest]
    fn unknown_resolution_is_rejected() {
        let settings = AppSettings {
            resolution: Some("first-wins".to_owned()),
            ..AppSettings::default()
        };
        assert!(matches!(
            settings.check_settings(),
            Err(SettingsError::InvalidResolution(_))
        ));
    }

    #[rstest]
    fn hostname_is_not_an_ip() {
        let settings = AppSettings {
            host: Some("localhost".to_owned()),
            ..AppSettings::default()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost { .. })
        ));
    }
}
