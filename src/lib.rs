pub mod api;
pub mod config;
pub mod daemon_rpc;
pub mod frontend;
pub mod metrics;
pub mod utils;

#[cfg(test)]
mod test_helpers;

pub use config::Settings;
pub use daemon_rpc::{DaemonRpcClient, UpstreamError};
pub use api::types::{ApiError, Envelope};
