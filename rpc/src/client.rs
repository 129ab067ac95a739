//! Typed node client.

use atto_blocks::{verify_account_info, AccountInfo, AccountInfoClaim, Block, BlockKind, Receivable};
use atto_crypto::Account;
use atto_types::BlockHash;
use atto_work::WorkNonce;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::RpcError;
use crate::messages::{
    decode, AccountInfoReply, AccountInfoRequest, BlockInfoReply, BlockInfoRequest, NodeReply,
    ProcessReply, ProcessRequest, ReceivableBlocks, ReceivableReply, ReceivableRequest,
    WorkGenerateReply, WorkGenerateRequest, ACCOUNT_NOT_FOUND, TRUE,
};
use crate::transport::Transport;

/// Outcome of an account lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountLookup {
    /// The account has a chain; its state has been verified.
    Opened(AccountInfo),
    /// The account has no blocks yet. Its first block will be an open.
    NotFound,
}

/// Client for the node actions a light wallet needs.
pub struct NodeClient<T> {
    transport: T,
}

impl<T: Transport> NodeClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `action` with `params` and decode the reply.
    async fn call<Q, R>(&self, action: &'static str, params: &Q) -> Result<NodeReply<R>, RpcError>
    where
        Q: Serialize,
        R: DeserializeOwned,
    {
        let mut body = serde_json::to_value(params)?;
        body.as_object_mut()
            .ok_or_else(|| RpcError::UnexpectedResponse {
                action,
                reason: "params must be a JSON object".into(),
            })?
            .insert("action".to_string(), serde_json::json!(action));

        debug!(action, "node request");
        let bytes = self.transport.send(body.to_string()).await?;
        Ok(decode(&bytes)?)
    }

    /// Like [`call`](Self::call), but any node error is a failure.
    async fn call_ok<Q, R>(&self, action: &'static str, params: &Q) -> Result<R, RpcError>
    where
        Q: Serialize,
        R: DeserializeOwned,
    {
        match self.call(action, params).await? {
            NodeReply::Ok(reply) => Ok(reply),
            NodeReply::Error(message) => Err(RpcError::Node { action, message }),
        }
    }

    /// Fetch an account's state and verify it against its frontier block.
    pub async fn account_info(&self, account: &Account) -> Result<AccountLookup, RpcError> {
        let params = AccountInfoRequest {
            account: account.address(),
            representative: TRUE,
        };
        let reply: AccountInfoReply = match self.call("account_info", &params).await? {
            NodeReply::Ok(reply) => reply,
            NodeReply::Error(message) if message == ACCOUNT_NOT_FOUND => {
                return Ok(AccountLookup::NotFound)
            }
            NodeReply::Error(message) => {
                return Err(RpcError::Node {
                    action: "account_info",
                    message,
                })
            }
        };

        let claim = AccountInfoClaim {
            frontier: reply.frontier,
            representative: Account::from_address(&reply.representative)?,
            balance: reply.balance,
        };
        let frontier_block = self.block_info(&claim.frontier).await?;
        let info = verify_account_info(account, &claim, &frontier_block)?;
        Ok(AccountLookup::Opened(info))
    }

    /// Fetch a block by hash. The kind comes from the node's subtype; when
    /// the node gives none, a first block is an open and anything else a
    /// change (the kind does not affect the hash).
    pub async fn block_info(&self, hash: &BlockHash) -> Result<Block, RpcError> {
        let params = BlockInfoRequest {
            json_block: TRUE,
            hash: hash.to_string(),
        };
        let reply: BlockInfoReply = self.call_ok("block_info", &params).await?;

        let mut block = Block::from_json(BlockKind::Change, &reply.contents)?;
        let kind = match reply.subtype.as_deref().and_then(BlockKind::from_subtype) {
            Some(kind) => kind,
            None if block.is_first() => BlockKind::Open,
            None => BlockKind::Change,
        };
        block.set_kind(kind);
        Ok(block)
    }

    /// Confirmed incoming transfers not yet received by `account`.
    pub async fn receivable(&self, account: &Account) -> Result<Vec<Receivable>, RpcError> {
        let params = ReceivableRequest {
            account: account.address(),
            include_only_confirmed: TRUE,
            source: TRUE,
        };
        let reply: ReceivableReply = self.call_ok("receivable", &params).await?;
        match reply.blocks {
            ReceivableBlocks::Entries(entries) => Ok(entries
                .into_iter()
                .map(|(source_hash, entry)| Receivable {
                    source_hash,
                    amount: entry.amount,
                    source: entry.source,
                })
                .collect()),
            ReceivableBlocks::Text(text) if text.is_empty() => Ok(Vec::new()),
            ReceivableBlocks::Text(text) => Err(RpcError::UnexpectedResponse {
                action: "receivable",
                reason: format!("blocks is the string '{text}'"),
            }),
        }
    }

    /// Have the node compute work for `subject`. `threshold` is sent only
    /// when the node's default does not apply.
    pub async fn work_generate(
        &self,
        subject: &[u8; 32],
        threshold: Option<u64>,
    ) -> Result<WorkNonce, RpcError> {
        let params = WorkGenerateRequest {
            hash: BlockHash::new(*subject).to_string(),
            difficulty: threshold.map(|t| format!("{t:016x}")),
        };
        let reply: WorkGenerateReply = self.call_ok("work_generate", &params).await?;
        Ok(reply.work.parse()?)
    }

    /// Submit a signed block with work and return its hash. A node that
    /// reports a different hash is rejected.
    pub async fn process(&self, block: &Block) -> Result<BlockHash, RpcError> {
        block.ensure_complete()?;
        let hash = block.hash()?;
        let json = block.to_json();
        let params = ProcessRequest {
            json_block: TRUE,
            subtype: block.kind().subtype(),
            block: &json,
        };
        let reply: ProcessReply = self.call_ok("process", &params).await?;
        if let Some(reported) = reply.hash {
            if reported != hash {
                return Err(RpcError::UnexpectedResponse {
                    action: "process",
                    reason: format!("node reported hash {reported}, expected {hash}"),
                });
            }
        }
        info!(kind = %block.kind(), hash = %hash, "block published");
        Ok(hash)
    }
}
