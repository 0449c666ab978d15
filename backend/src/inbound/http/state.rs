//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain types and remain testable without I/O.

use std::sync::Arc;

use crate::domain::{CreditCheckController, Error, ViewerRegistry};

use super::session::SessionContext;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Per-viewer controllers.
    pub viewers: Arc<ViewerRegistry>,
}

impl HttpState {
    /// Construct state around a viewer registry.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use concreds::domain::ports::{ImmediateLatency, StaticRecordLookup};
    /// use concreds::domain::{CheckPorts, CheckSettings, RecordSet, ViewerRegistry};
    /// use concreds::inbound::http::state::HttpState;
    ///
    /// let lookup = StaticRecordLookup::new(RecordSet::sample().expect("sample data"));
    /// let ports = CheckPorts::new(Arc::new(lookup), Arc::new(ImmediateLatency));
    /// let state = HttpState::new(Arc::new(ViewerRegistry::new(ports, CheckSettings::default(), 8)));
    /// assert!(state.viewers.is_empty());
    /// ```
    pub fn new(viewers: Arc<ViewerRegistry>) -> Self {
        Self { viewers }
    }

    /// Resolve the controller owned by the caller's session.
    pub fn controller(&self, session: &SessionContext) -> Result<CreditCheckController, Error> {
        let viewer = session.viewer_id()?;
        Ok(self.viewers.controller_for(&viewer))
    }
}
