use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::daemon_rpc::DaemonRpcClient;

use super::handlers;

/// The `/api` surface. Anything under `/api` that does not match a route gets
/// the failure envelope with a 404 rather than the frontend fallback.
pub fn create_router(client: Arc<DaemonRpcClient>) -> Router {
    Router::new()
        .nest("/api", Router::new()
            .route("/getinfo", get(handlers::get_info))
            .route("/height/:height", get(handlers::get_block_by_height))
            .route("/range/:height", get(handlers::get_blocks_range))
            .route("/header/:hash", get(handlers::get_block_header))
            .route("/block/:hash", get(handlers::get_block_by_hash))
            .route("/transaction/:hash", get(handlers::get_transaction))
            .route("/id/:payment_id", get(handlers::get_transactions_by_payment_id))
            .route("/mempool", get(handlers::get_mempool))
            .fallback(handlers::not_found)
            .with_state(client)
        )
}
