//! HTTP inbound adapter: the server-rendered page, its JSON mirror, and probes.

pub mod error;
pub mod health;
pub mod html;
pub mod page;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod view;

pub use error::ApiResult;
