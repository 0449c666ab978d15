//! Inbound adapters that translate external requests into domain calls while
//! keeping framework details at the edge.
//!
//! Only HTTP exists today; see [`http`].

pub mod http;
