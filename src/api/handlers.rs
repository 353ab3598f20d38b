use axum::{
    extract::{rejection::{PathRejection, QueryRejection}, Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use super::types::{
    failure_body, ApiError, BlockDetail, BlockHeader, BlockSummary, BlocksRange, Envelope,
    Mempool, NodeStatus, PaymentIdTransactions, TransactionDetail, TransactionSummary,
};
use crate::daemon_rpc::DaemonRpcClient;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Largest transaction offset a block page may start at.
pub const MAX_BLOCK_TX_OFFSET: i64 = 50;

/// Transactions returned per block page.
pub const BLOCK_TX_PAGE_SIZE: usize = 10;

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct BlockQuery {
    pub offset: Option<i64>,
}

/// Negative offsets start at the first transaction; large ones stop at the cap.
pub fn clamp_offset(offset: i64) -> usize {
    offset.clamp(0, MAX_BLOCK_TX_OFFSET) as usize
}

// Heights that are not non-negative integers are treated as unknown routes.
fn height_param(height: Result<Path<u64>, PathRejection>) -> Result<u64, ApiError> {
    match height {
        Ok(Path(height)) => Ok(height),
        Err(rejection) => {
            debug!("rejecting height segment: {}", rejection);
            Err(ApiError::NotFound)
        }
    }
}

pub async fn get_info(
    State(client): State<Arc<DaemonRpcClient>>,
) -> ApiResult<NodeStatus> {
    let info = client.get_info().await?;
    Ok(Envelope::ok(NodeStatus::from(info)))
}

pub async fn get_block_by_height(
    State(client): State<Arc<DaemonRpcClient>>,
    height: Result<Path<u64>, PathRejection>,
) -> ApiResult<BlockHeader> {
    let height = height_param(height)?;
    let response = client.get_block_header_by_height(height).await?;
    Ok(Envelope::ok(BlockHeader::from(response.block_header)))
}

pub async fn get_block_header(
    State(client): State<Arc<DaemonRpcClient>>,
    Path(hash): Path<String>,
) -> ApiResult<BlockHeader> {
    let response = client.get_block_header_by_hash(&hash).await?;
    Ok(Envelope::ok(BlockHeader::from(response.block_header)))
}

pub async fn get_blocks_range(
    State(client): State<Arc<DaemonRpcClient>>,
    height: Result<Path<u64>, PathRejection>,
) -> ApiResult<BlocksRange> {
    let height = height_param(height)?;
    let response = client.get_blocks_list(height).await?;

    Ok(Envelope::ok(BlocksRange {
        blocks: response.blocks.into_iter().map(BlockSummary::from).collect(),
    }))
}

pub async fn get_block_by_hash(
    State(client): State<Arc<DaemonRpcClient>>,
    Path(hash): Path<String>,
    query: Result<Query<BlockQuery>, QueryRejection>,
) -> ApiResult<BlockDetail> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let offset = clamp_offset(query.offset.unwrap_or(0));

    let response = client.get_block(&hash).await?;
    Ok(Envelope::ok(BlockDetail::from_block(response.block, offset, BLOCK_TX_PAGE_SIZE)))
}

pub async fn get_transaction(
    State(client): State<Arc<DaemonRpcClient>>,
    Path(hash): Path<String>,
) -> ApiResult<TransactionDetail> {
    let response = client.get_transaction_details(&hash).await?;
    Ok(Envelope::ok(TransactionDetail::from(response.transaction)))
}

pub async fn get_transactions_by_payment_id(
    State(client): State<Arc<DaemonRpcClient>>,
    Path(payment_id): Path<String>,
) -> ApiResult<PaymentIdTransactions> {
    let response = client.get_transactions_by_payment_id(&payment_id).await?;

    Ok(Envelope::ok(PaymentIdTransactions {
        transactions: response
            .transactions
            .into_iter()
            .map(TransactionSummary::from)
            .collect(),
    }))
}

pub async fn get_mempool(
    State(client): State<Arc<DaemonRpcClient>>,
) -> ApiResult<Mempool> {
    let response = client.get_mempool().await?;

    Ok(Envelope::ok(Mempool {
        mempool: response.mempool.into_iter().map(Into::into).collect(),
    }))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(failure_body()))
}
