//! Request parameters and reply shapes of the node actions the client uses.
//!
//! Requests are serialised without their `action`; the client adds it.
//! Every reply may instead be `{"error": "..."}`, which [`decode`] turns
//! into [`NodeReply::Error`] before the reply shape is looked at.

use std::collections::BTreeMap;

use atto_blocks::JsonBlock;
use atto_types::{BlockHash, Raw};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// What the node says for an account without any blocks.
pub const ACCOUNT_NOT_FOUND: &str = "Account not found";

/// The node encodes booleans in requests as strings.
pub(crate) const TRUE: &str = "true";

#[derive(Debug, Serialize)]
pub struct AccountInfoRequest<'a> {
    pub account: &'a str,
    pub representative: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct AccountInfoReply {
    pub frontier: BlockHash,
    pub representative: String,
    pub balance: Raw,
}

#[derive(Debug, Serialize)]
pub struct BlockInfoRequest {
    pub json_block: &'static str,
    pub hash: String,
}

#[derive(Debug, Deserialize)]
pub struct BlockInfoReply {
    pub contents: JsonBlock,
    #[serde(default)]
    pub subtype: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReceivableRequest<'a> {
    pub account: &'a str,
    pub include_only_confirmed: &'static str,
    pub source: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ReceivableReply {
    pub blocks: ReceivableBlocks,
}

/// The node sends `"blocks": ""` instead of an empty object when nothing is
/// receivable.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReceivableBlocks {
    Entries(BTreeMap<BlockHash, ReceivableEntry>),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct ReceivableEntry {
    pub amount: Raw,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Serialize)]
pub struct WorkGenerateRequest {
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WorkGenerateReply {
    pub work: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessRequest<'a> {
    pub json_block: &'static str,
    pub subtype: &'static str,
    pub block: &'a JsonBlock,
}

#[derive(Debug, Deserialize)]
pub struct ProcessReply {
    #[serde(default)]
    pub hash: Option<BlockHash>,
}

/// A decoded node reply: the expected shape, or the node's error string.
#[derive(Debug)]
pub enum NodeReply<R> {
    Ok(R),
    Error(String),
}

/// Decode reply bytes, checking for an `"error"` field first.
pub fn decode<R: DeserializeOwned>(bytes: &[u8]) -> Result<NodeReply<R>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        return Ok(NodeReply::Error(message.to_string()));
    }
    serde_json::from_value(value).map(NodeReply::Ok)
}
