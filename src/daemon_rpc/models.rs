//! Typed views of the daemon's responses. Only the fields the API exposes
//! are decoded; anything else the daemon sends is ignored.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct NodeInfo {
    #[serde(deserialize_with = "lenient_f64")]
    pub already_generated_coins: f64,
    #[serde(deserialize_with = "lenient_u64")]
    pub difficulty: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub readable_tx_fee: f64,
    #[serde(deserialize_with = "lenient_u64")]
    pub last_block_reward: u64,
    pub height: u64,
    pub top_block_hash: String,
    pub tx_count: u64,
    pub tx_pool_size: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockHeaderResponse {
    pub block_header: BlockHeader,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockHeader {
    pub height: u64,
    pub hash: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub reward: u64,
    pub prev_hash: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub difficulty: u64,
    pub orphan_status: bool,
    pub timestamp: u64,
    pub nonce: u64,
    pub major_version: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlocksListResponse {
    pub blocks: Vec<BlockShort>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockShort {
    pub height: u64,
    pub hash: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub difficulty: u64,
    pub cumul_size: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub min_tx_fee: u64,
    pub timestamp: u64,
    pub tx_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockResponse {
    pub block: Block,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub height: u64,
    pub hash: String,
    #[serde(rename = "baseReward", deserialize_with = "lenient_u64")]
    pub base_reward: u64,
    #[serde(rename = "totalFeeAmount", deserialize_with = "lenient_u64")]
    pub total_fee_amount: u64,
    #[serde(rename = "blockSize")]
    pub block_size: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub difficulty: u64,
    pub major_version: u32,
    pub nonce: u64,
    pub orphan_status: bool,
    pub prev_hash: String,
    pub timestamp: u64,
    pub transactions: Vec<TransactionShort>,
}

/// Transaction row as it appears in block bodies and payment id lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionShort {
    pub hash: String,
    pub size: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub amount_out: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub fee: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsByPaymentIdResponse {
    pub transactions: Vec<TransactionShort>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MempoolResponse {
    pub mempool: Vec<MempoolTransaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MempoolTransaction {
    pub hash: String,
    pub size: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub amount_out: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub fee: u64,
    #[serde(rename = "receiveTime")]
    pub receive_time: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDetailsResponse {
    pub transaction: TransactionDetails,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub block_hash: String,
    pub block_index: u64,
    pub hash: String,
    pub timestamp: u64,
    pub unlock_time: u64,
    pub size: u64,
    pub in_blockchain: bool,
    #[serde(deserialize_with = "lenient_u64")]
    pub fee: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub total_inputs_amount: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub total_outputs_amount: u64,
    pub payment_id: String,
    pub signatures: Value,
    pub inputs: Value,
    pub outputs: Value,
    pub mixin: u64,
    pub extra: TransactionExtra,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionExtra {
    pub public_key: String,
    #[serde(default)]
    pub nonce: Value,
    #[serde(default)]
    pub raw: Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Unsigned(u64),
    Float(f64),
    Text(String),
}

// The daemon reports some amounts as strings ("12345.000000000000").
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Unsigned(n) => Ok(n as f64),
        NumberOrString::Float(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Unsigned(n) => Ok(n),
        NumberOrString::Float(n) if n >= 0.0 && n.fract() == 0.0 => Ok(n as u64),
        NumberOrString::Float(n) => Err(serde::de::Error::custom(format!("expected an integer amount, got {}", n))),
        NumberOrString::Text(s) => s.trim().parse::<u64>().map_err(serde::de::Error::custom),
    }
}
