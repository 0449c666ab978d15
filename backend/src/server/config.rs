//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};

use concreds::domain::CheckSettings;
use concreds::inbound::http::session_config::SessionSettings;

/// Everything [`super::create_server`] needs besides the health state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) check: CheckSettings,
    pub(crate) max_viewers: usize,
}

impl ServerConfig {
    /// Combine validated session settings with the bind address.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            check: CheckSettings::default(),
            max_viewers: concreds::domain::DEFAULT_MAX_VIEWERS,
        }
    }

    /// Override the controller tunables.
    #[must_use]
    pub fn with_check_settings(mut self, check: CheckSettings) -> Self {
        self.check = check;
        self
    }

    /// Override the viewer registry capacity.
    #[must_use]
    pub fn with_max_viewers(mut self, max_viewers: usize) -> Self {
        self.max_viewers = max_viewers;
        self
    }
}
