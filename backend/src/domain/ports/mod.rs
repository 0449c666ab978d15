//! Domain ports defining the edges of the hexagon.
//!
//! The credit check depends on two driven capabilities: somewhere to look
//! records up, and something that makes the lookup take a while. Both are
//! traits so tests can substitute deterministic doubles.

mod latency_simulator;
mod record_lookup;

pub use latency_simulator::{ImmediateLatency, LatencySimulator, TokioLatency};
#[cfg(test)]
pub use record_lookup::MockRecordLookup;
pub use record_lookup::{RecordLookup, StaticRecordLookup};
