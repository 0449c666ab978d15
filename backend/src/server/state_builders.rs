//! Builder for the HTTP state from server configuration.

use std::sync::Arc;

use actix_web::web;

use concreds::domain::ports::{StaticRecordLookup, TokioLatency};
use concreds::domain::{CheckPorts, RecordSet, ViewerRegistry};
use concreds::inbound::http::state::HttpState;

use super::ServerConfig;

/// Wire the sample record set and real-time latency into a viewer registry.
///
/// # Errors
/// Returns [`std::io::Error`] if the compiled-in record set fails validation.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let records = RecordSet::sample()
        .map_err(|err| std::io::Error::other(format!("invalid sample records: {err}")))?;
    let ports = CheckPorts::new(
        Arc::new(StaticRecordLookup::new(records)),
        Arc::new(TokioLatency),
    );
    let registry = ViewerRegistry::new(ports, config.check, config.max_viewers);
    Ok(web::Data::new(HttpState::new(Arc::new(registry))))
}
