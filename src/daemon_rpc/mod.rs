use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DaemonSettings;
use crate::metrics;

pub mod models;

use models::{
    BlockHeaderResponse, BlockResponse, BlocksListResponse, MempoolResponse, NodeInfo,
    TransactionDetailsResponse, TransactionsByPaymentIdResponse,
};

/// Every upstream call gets exactly one attempt bounded by this timeout.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(2);

/// Why an upstream call produced no data. The API collapses all of these into
/// one public failure; the variants exist for logs and metrics.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("daemon did not answer within {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("daemon returned HTTP {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("RPC error: {0}")]
    Rpc(Value),
    #[error("response has no result field")]
    MissingResult,
}

impl UpstreamError {
    /// Short label used as the metrics `outcome`.
    pub fn cause(&self) -> &'static str {
        match self {
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Status(_) => "status",
            UpstreamError::Decode(_) => "decode",
            UpstreamError::Rpc(_) => "rpc_error",
            UpstreamError::MissingResult => "missing_result",
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout(UPSTREAM_TIMEOUT)
        } else {
            UpstreamError::Transport(e)
        }
    }
}

#[derive(Debug, Clone)]
pub struct DaemonRpcClient {
    client: Client,
    endpoint: String,
    request_id: String,
}

impl DaemonRpcClient {
    pub fn new(settings: &DaemonSettings) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            request_id: settings.request_id.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Plain `GET /getinfo`.
    pub async fn get_info(&self) -> Result<NodeInfo, UpstreamError> {
        let started = Instant::now();
        let result = self.fetch_info().await;
        self.record("getinfo", started, &result);
        result
    }

    async fn fetch_info(&self) -> Result<NodeInfo, UpstreamError> {
        let response = self.client
            .get(format!("{}/getinfo", self.endpoint))
            .send()
            .await?;

        let body = read_json(response).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// POST a JSON-RPC request to `/json_rpc` and decode its `result`.
    pub async fn call<P, R>(&self, method: &str, params: P) -> Result<R, UpstreamError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let started = Instant::now();
        let result = self.send_rpc(method, params).await;
        self.record(method, started, &result);
        result
    }

    async fn send_rpc<P, R>(&self, method: &str, params: P) -> Result<R, UpstreamError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let response = self.client
            .post(format!("{}/json_rpc", self.endpoint))
            .json(&json!({
                "jsonrpc": "2.0",
                "id": self.request_id,
                "method": method,
                "params": params
            }))
            .send()
            .await?;

        let mut body = read_json(response).await?;

        // Any `error` key counts, even `null`.
        if let Some(error) = body.get("error") {
            return Err(UpstreamError::Rpc(error.clone()));
        }

        let result = body
            .get_mut("result")
            .map(Value::take)
            .ok_or(UpstreamError::MissingResult)?;

        Ok(serde_json::from_value(result)?)
    }

    fn record<T>(&self, method: &str, started: Instant, result: &Result<T, UpstreamError>) {
        let elapsed = started.elapsed();
        metrics::record_upstream_latency(method, elapsed);

        match result {
            Ok(_) => {
                debug!("{} answered in {:?}", method, elapsed);
                metrics::record_upstream_request(method, "ok");
            }
            Err(e) => {
                warn!("{} call to {} failed after {:?}: {}", method, self.endpoint, elapsed, e);
                metrics::record_upstream_request(method, e.cause());
            }
        }
    }

    pub async fn get_block_header_by_height(&self, height: u64) -> Result<BlockHeaderResponse, UpstreamError> {
        self.call("getblockheaderbyheight", json!({ "height": height })).await
    }

    pub async fn get_block_header_by_hash(&self, hash: &str) -> Result<BlockHeaderResponse, UpstreamError> {
        self.call("getblockheaderbyhash", json!({ "hash": hash })).await
    }

    pub async fn get_blocks_list(&self, height: u64) -> Result<BlocksListResponse, UpstreamError> {
        self.call("f_blocks_list_json", json!({ "height": height })).await
    }

    pub async fn get_block(&self, hash: &str) -> Result<BlockResponse, UpstreamError> {
        self.call("f_block_json", json!({ "hash": hash })).await
    }

    pub async fn get_transaction_details(&self, hash: &str) -> Result<TransactionDetailsResponse, UpstreamError> {
        self.call("k_transaction_details_by_hash", json!({ "hash": hash })).await
    }

    pub async fn get_transactions_by_payment_id(
        &self,
        payment_id: &str,
    ) -> Result<TransactionsByPaymentIdResponse, UpstreamError> {
        self.call("k_transactions_by_payment_id", json!({ "payment_id": payment_id })).await
    }

    pub async fn get_mempool(&self) -> Result<MempoolResponse, UpstreamError> {
        self.call("f_mempool_json", json!({})).await
    }
}

async fn read_json(response: Response) -> Result<Value, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::Status(status));
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
