use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::daemon_rpc::{models, UpstreamError};
use crate::utils::{atomic_to_coins, hashrate_from_difficulty};

/// The only error message clients ever see.
pub const REQUEST_FAILED: &str = "Request failed";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Upstream failures are reported in the body, not the status line.
        let status = match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::OK,
        };

        (status, Json(failure_body())).into_response()
    }
}

pub fn failure_body() -> Value {
    json!({
        "error": REQUEST_FAILED,
        "data": {}
    })
}

/// Successful `{error: null, data}` envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub error: Option<&'static str>,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self { error: None, data })
    }
}

#[derive(Debug, Serialize)]
pub struct NodeStatus {
    pub supply: f64,
    pub hashrate: u64,
    pub min_fee: f64,
    pub reward: f64,
    pub difficulty: u64,
    pub height: u64,
    pub hash: String,
    pub tx_count: u64,
    pub mempool: u64,
}

impl From<models::NodeInfo> for NodeStatus {
    fn from(info: models::NodeInfo) -> Self {
        Self {
            supply: info.already_generated_coins,
            hashrate: hashrate_from_difficulty(info.difficulty),
            min_fee: info.readable_tx_fee,
            reward: atomic_to_coins(info.last_block_reward),
            difficulty: info.difficulty,
            height: info.height,
            hash: info.top_block_hash,
            tx_count: info.tx_count,
            mempool: info.tx_pool_size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlockHeader {
    pub height: u64,
    pub hash: String,
    pub reward: f64,
    pub prev_hash: String,
    pub difficulty: u64,
    pub orphan: bool,
    pub timestamp: u64,
    pub nonce: u64,
    pub version: u32,
}

impl From<models::BlockHeader> for BlockHeader {
    fn from(header: models::BlockHeader) -> Self {
        Self {
            height: header.height,
            hash: header.hash,
            reward: atomic_to_coins(header.reward),
            prev_hash: header.prev_hash,
            difficulty: header.difficulty,
            orphan: header.orphan_status,
            timestamp: header.timestamp,
            nonce: header.nonce,
            version: header.major_version,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlockSummary {
    pub height: u64,
    pub hash: String,
    pub difficulty: u64,
    pub size: u64,
    pub min_fee: f64,
    pub timestamp: u64,
    pub tx_count: u64,
}

impl From<models::BlockShort> for BlockSummary {
    fn from(block: models::BlockShort) -> Self {
        Self {
            height: block.height,
            hash: block.hash,
            difficulty: block.difficulty,
            size: block.cumul_size,
            min_fee: atomic_to_coins(block.min_tx_fee),
            timestamp: block.timestamp,
            tx_count: block.tx_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlocksRange {
    pub blocks: Vec<BlockSummary>,
}

#[derive(Debug, Serialize)]
pub struct TransactionSummary {
    pub hash: String,
    pub size: u64,
    pub amount: f64,
    pub fee: f64,
}

impl From<models::TransactionShort> for TransactionSummary {
    fn from(tx: models::TransactionShort) -> Self {
        Self {
            hash: tx.hash,
            size: tx.size,
            amount: atomic_to_coins(tx.amount_out),
            fee: atomic_to_coins(tx.fee),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlockDetail {
    pub height: u64,
    pub hash: String,
    pub reward: f64,
    pub fees: f64,
    pub size: u64,
    pub difficulty: u64,
    pub version: u32,
    pub nonce: u64,
    pub orphan: bool,
    pub prev_hash: String,
    pub timestamp: u64,
    pub tx_count: usize,
    pub transactions: Vec<TransactionSummary>,
}

impl BlockDetail {
    /// Keeps only `page_size` transactions starting at `offset`.
    pub fn from_block(block: models::Block, offset: usize, page_size: usize) -> Self {
        let tx_count = block.transactions.len();
        let transactions = block
            .transactions
            .into_iter()
            .skip(offset)
            .take(page_size)
            .map(TransactionSummary::from)
            .collect();

        Self {
            height: block.height,
            hash: block.hash,
            reward: atomic_to_coins(block.base_reward),
            fees: atomic_to_coins(block.total_fee_amount),
            size: block.block_size,
            difficulty: block.difficulty,
            version: block.major_version,
            nonce: block.nonce,
            orphan: block.orphan_status,
            prev_hash: block.prev_hash,
            timestamp: block.timestamp,
            tx_count,
            transactions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionDetail {
    pub block: String,
    pub height: u64,
    pub hash: String,
    pub timestamp: u64,
    pub unlock_time: u64,
    pub size: u64,
    pub mempool: bool,
    pub fee: f64,
    pub inputs_amount: f64,
    pub outputs_amount: f64,
    pub coinbase: bool,
    pub payment_id: String,
    pub signatures: Value,
    pub inputs: Value,
    pub outputs: Value,
    pub mixin: u64,
    pub public_key: String,
    pub nonce: Value,
    pub raw: Value,
}

impl From<models::TransactionDetails> for TransactionDetail {
    fn from(tx: models::TransactionDetails) -> Self {
        Self {
            block: tx.block_hash,
            height: tx.block_index,
            hash: tx.hash,
            timestamp: tx.timestamp,
            unlock_time: tx.unlock_time,
            size: tx.size,
            mempool: !tx.in_blockchain,
            fee: atomic_to_coins(tx.fee),
            inputs_amount: atomic_to_coins(tx.total_inputs_amount),
            outputs_amount: atomic_to_coins(tx.total_outputs_amount),
            coinbase: tx.total_inputs_amount == 0,
            payment_id: tx.payment_id,
            signatures: tx.signatures,
            inputs: tx.inputs,
            outputs: tx.outputs,
            mixin: tx.mixin,
            public_key: tx.extra.public_key,
            nonce: tx.extra.nonce,
            raw: tx.extra.raw,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentIdTransactions {
    pub transactions: Vec<TransactionSummary>,
}

#[derive(Debug, Serialize)]
pub struct MempoolTransaction {
    pub hash: String,
    pub size: u64,
    pub amount: f64,
    pub fee: f64,
    pub received: u64,
}

impl From<models::MempoolTransaction> for MempoolTransaction {
    fn from(tx: models::MempoolTransaction) -> Self {
        Self {
            hash: tx.hash,
            size: tx.size,
            amount: atomic_to_coins(tx.amount_out),
            fee: atomic_to_coins(tx.fee),
            received: tx.receive_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Mempool {
    pub mempool: Vec<MempoolTransaction>,
}
