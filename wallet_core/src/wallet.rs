//! One account of a seed, driven against an untrusted node.
//!
//! Every operation starts from verified account info (see
//! [`NodeClient::account_info`]), builds the next block locally, signs it,
//! attaches work and submits it.

use atto_blocks::{AccountInfo, Block, BlockError, Receivable};
use atto_crypto::{derive_private_key, Account};
use atto_rpc::{AccountLookup, NodeClient, Transport};
use atto_types::{BlockHash, PrivateKey, Raw, Unit};
use atto_work::{validate_work, WorkBlockKind, WorkGenerator, WorkNonce, WorkThresholds};
use tracing::{info, warn};

use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::work::WorkSource;

/// A receivable that has been received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Received {
    pub receivable: Receivable,
    pub hash: BlockHash,
}

pub struct Wallet<T> {
    client: NodeClient<T>,
    private_key: PrivateKey,
    account: Account,
    default_representative: Account,
    unit: Unit,
    work_source: WorkSource,
    thresholds: WorkThresholds,
    generator: WorkGenerator,
}

impl<T: Transport> Wallet<T> {
    pub fn new(
        client: NodeClient<T>,
        private_key: PrivateKey,
        config: &WalletConfig,
    ) -> Result<Self, WalletError> {
        config.validate()?;
        let account = Account::from_private_key(&private_key, &config.address_prefix);
        Ok(Self {
            client,
            private_key,
            account,
            default_representative: config.representative()?,
            unit: config.unit(),
            work_source: config.work_source,
            thresholds: config.thresholds(),
            generator: config.generator(),
        })
    }

    /// The account at `index` of `seed`.
    pub fn from_seed(
        client: NodeClient<T>,
        seed: &[u8],
        index: u32,
        config: &WalletConfig,
    ) -> Result<Self, WalletError> {
        let private_key = derive_private_key(seed, index)?;
        Self::new(client, private_key, config)
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn client(&self) -> &NodeClient<T> {
        &self.client
    }

    /// Verified account state from the node.
    pub async fn account_info(&self) -> Result<AccountLookup, WalletError> {
        Ok(self.client.account_info(&self.account).await?)
    }

    /// Verified balance; zero for an account without a chain.
    pub async fn balance(&self) -> Result<Raw, WalletError> {
        Ok(match self.account_info().await? {
            AccountLookup::Opened(info) => info.balance,
            AccountLookup::NotFound => Raw::zero(),
        })
    }

    async fn opened_info(&self) -> Result<AccountInfo, WalletError> {
        match self.account_info().await? {
            AccountLookup::Opened(info) => Ok(info),
            AccountLookup::NotFound => Err(BlockError::AccountNotOpened.into()),
        }
    }

    /// Receive everything receivable, opening the account with the default
    /// representative if needed. Returns the final account state and what
    /// was received, in order.
    pub async fn receive_pending(&self) -> Result<(AccountInfo, Vec<Received>), WalletError> {
        let mut cursor = match self.account_info().await? {
            AccountLookup::Opened(info) => info,
            AccountLookup::NotFound => {
                AccountInfo::unopened(self.account.clone(), self.default_representative.clone())
            }
        };

        let mut received = Vec::new();
        for receivable in self.client.receivable(&self.account).await? {
            info!(
                amount = %self.unit.raw_to_decimal(&receivable.amount),
                source = %receivable.source,
                "receiving"
            );
            let mut block = cursor.receive(&receivable)?;
            let hash = self.publish(&mut block).await?;
            cursor = cursor.apply(&block)?;
            received.push(Received { receivable, hash });
        }
        Ok((cursor, received))
    }

    /// Send `amount` (decimal, in the wallet's unit) to `recipient`.
    pub async fn send(&self, amount: &str, recipient: &Account) -> Result<BlockHash, WalletError> {
        let info = self.opened_info().await?;
        let mut block = info.send(&self.unit, amount, recipient)?;
        self.publish(&mut block).await
    }

    /// Delegate to `representative` from now on.
    pub async fn change_representative(
        &self,
        representative: Account,
    ) -> Result<BlockHash, WalletError> {
        let info = self.opened_info().await?;
        let mut block = info.change(representative)?;
        self.publish(&mut block).await
    }

    /// Sign `block`, attach work and submit it.
    pub async fn publish(&self, block: &mut Block) -> Result<BlockHash, WalletError> {
        block.sign(&self.private_key)?;
        self.fill_work(block).await?;
        Ok(self.client.process(block).await?)
    }

    /// Attach work from the configured source.
    pub async fn fill_work(&self, block: &mut Block) -> Result<WorkNonce, WalletError> {
        let nonce = match self.work_source {
            WorkSource::Local => self.local_work(block).await?,
            WorkSource::Node => self.node_work(block).await?,
            WorkSource::LocalFallback => match self.node_work(block).await {
                Ok(nonce) => nonce,
                Err(e) => {
                    warn!(error = %e, "node could not provide work, computing locally");
                    self.local_work(block).await?
                }
            },
        };
        block.set_work(nonce);
        Ok(nonce)
    }

    async fn node_work(&self, block: &Block) -> Result<WorkNonce, WalletError> {
        let subject = block.work_subject();
        let threshold = block.work_threshold(&self.thresholds);
        // Only receive blocks ask for something other than the node's default.
        let difficulty = match block.kind().work_kind() {
            WorkBlockKind::Receive => Some(threshold),
            WorkBlockKind::Base => None,
        };
        let nonce = self.client.work_generate(&subject, difficulty).await?;
        if !validate_work(&subject, nonce.0, threshold) {
            return Err(WalletError::InsufficientWork {
                nonce: nonce.to_string(),
                threshold,
            });
        }
        Ok(nonce)
    }

    async fn local_work(&self, block: &Block) -> Result<WorkNonce, WalletError> {
        let subject = block.work_subject();
        let threshold = block.work_threshold(&self.thresholds);
        let generator = self.generator;
        let nonce = tokio::task::spawn_blocking(move || generator.generate(&subject, threshold))
            .await
            .map_err(|e| WalletError::WorkTask(e.to_string()))??;
        Ok(nonce)
    }
}
