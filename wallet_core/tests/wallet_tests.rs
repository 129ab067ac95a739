//! Wallet flows against scripted node replies.

use atto_blocks::{Block, BlockError, BlockKind};
use atto_crypto::{keypair_from_seed, Account};
use atto_rpc::{NodeClient, NullTransport, TransportError};
use atto_types::{BlockHash, KeyPair, Link, Raw};
use atto_wallet_core::{ThresholdConfig, Wallet, WalletConfig, WalletError, WorkSource};
use atto_work::{WorkNonce, WorkThresholds};
use serde_json::json;

const SEED: [u8; 32] = [0x5A; 32];
const NANO: u128 = 1_000_000_000_000_000_000_000_000_000_000;

fn own_keys() -> KeyPair {
    keypair_from_seed(&SEED, 0).unwrap()
}

fn own_account() -> Account {
    Account::from_public_key(own_keys().public, "nano_")
}

fn other(index: u32) -> Account {
    let keys = keypair_from_seed(&[0x33; 32], index).unwrap();
    Account::from_public_key(keys.public, "nano_")
}

fn config(work_source: WorkSource, threshold: u64) -> WalletConfig {
    WalletConfig {
        work_source,
        work_thresholds: ThresholdConfig {
            default: threshold,
            receive: threshold,
        },
        work_threads: 2,
        ..WalletConfig::default()
    }
}

fn wallet(transport: NullTransport, config: &WalletConfig) -> Wallet<NullTransport> {
    Wallet::from_seed(NodeClient::new(transport), &SEED, 0, config).unwrap()
}

/// The signed head of the wallet account's chain.
fn frontier(balance: u128, representative: &Account) -> Block {
    let mut block = Block::new(
        BlockKind::Receive,
        own_account(),
        BlockHash::new([0x61; 32]),
        representative.clone(),
        Raw::from(balance),
        Link::new([0x62; 32]),
    );
    block.sign(&own_keys().private).unwrap();
    block.set_work(WorkNonce(1));
    block
}

/// Queue the account_info and block_info replies for `block`.
fn push_opened(transport: &NullTransport, block: &Block, claimed_balance: u128) {
    transport.push_json(json!({
        "frontier": block.hash().unwrap().to_string(),
        "representative": block.representative().address(),
        "balance": claimed_balance.to_string(),
    }));
    transport.push_json(json!({
        "contents": block.to_json(),
        "subtype": block.kind().subtype(),
    }));
}

#[test]
fn from_seed_uses_derived_account() {
    let wallet = wallet(NullTransport::new(), &WalletConfig::default());
    assert_eq!(wallet.account(), &own_account());
}

#[test]
fn prefix_comes_from_config() {
    let config = WalletConfig {
        address_prefix: "xrb_".into(),
        ..WalletConfig::default()
    };
    let wallet = wallet(NullTransport::new(), &config);
    assert!(wallet.account().address().starts_with("xrb_"));
    assert_eq!(wallet.account().public_key(), &own_keys().public);
}

#[test]
fn oversized_unit_is_refused() {
    let config = WalletConfig {
        unit_digits: u32::MAX,
        ..WalletConfig::default()
    };
    let result = Wallet::from_seed(NodeClient::new(NullTransport::new()), &SEED, 0, &config);
    assert!(matches!(result, Err(WalletError::Config(_))));
}

#[tokio::test]
async fn balance_of_unopened_account_is_zero() {
    let transport = NullTransport::new();
    transport.push_json(json!({ "error": "Account not found" }));
    let wallet = wallet(transport, &WalletConfig::default());
    assert_eq!(wallet.balance().await.unwrap(), Raw::zero());
}

#[tokio::test]
async fn balance_is_verified() {
    let block = frontier(3 * NANO, &other(1));
    let transport = NullTransport::new();
    push_opened(&transport, &block, 3 * NANO);
    let wallet = wallet(transport, &WalletConfig::default());
    let balance = wallet.balance().await.unwrap();
    assert_eq!(wallet.unit().raw_to_decimal(&balance), "3");
}

#[tokio::test]
async fn forged_balance_is_reported() {
    let block = frontier(3 * NANO, &other(1));
    let transport = NullTransport::new();
    push_opened(&transport, &block, 300 * NANO);
    let err = wallet(transport, &WalletConfig::default())
        .balance()
        .await
        .unwrap_err();
    assert!(err.is_manipulation(), "{err}");
}

#[tokio::test]
async fn receive_pending_opens_account() {
    let config = config(WorkSource::Local, 0);
    let transport = NullTransport::new();
    transport.push_json(json!({ "error": "Account not found" }));
    transport.push_json(json!({
        "blocks": {
            "0303030303030303030303030303030303030303030303030303030303030303": {
                "amount": "2000",
                "source": other(2).address(),
            }
        }
    }));
    transport.push_json(json!({}));

    let wallet = wallet(transport, &config);
    let (info, received) = wallet.receive_pending().await.unwrap();

    assert_eq!(received.len(), 1);
    assert_eq!(received[0].receivable.source_hash, BlockHash::new([3; 32]));
    assert_eq!(info.balance, Raw::from(2000u128));
    assert_eq!(info.frontier, received[0].hash);
    assert_eq!(info.representative, config.representative().unwrap());

    let transport = wallet.client().transport();
    assert_eq!(transport.actions(), vec!["account_info", "receivable", "process"]);
    let process = &transport.requests()[2];
    assert_eq!(process["subtype"], "receive");
    assert_eq!(process["block"]["previous"], "0".repeat(64));
    assert_eq!(process["block"]["link"], "03".repeat(32));
    assert_eq!(process["block"]["balance"], "2000");
    assert_eq!(process["block"]["work"], "0000000000000000");

    // The submitted block is signed by the wallet's key.
    let submitted: atto_blocks::JsonBlock =
        serde_json::from_value(process["block"].clone()).unwrap();
    let block = Block::from_json(BlockKind::Open, &submitted).unwrap();
    assert!(block.verify_signature().is_ok());
    assert_eq!(block.hash().unwrap(), received[0].hash);
}

#[tokio::test]
async fn receive_pending_chains_blocks() {
    let config = config(WorkSource::Local, 0);
    let head = frontier(10, &other(1));
    let transport = NullTransport::new();
    push_opened(&transport, &head, 10);
    transport.push_json(json!({
        "blocks": {
            "0101010101010101010101010101010101010101010101010101010101010101": { "amount": "5" },
            "0202020202020202020202020202020202020202020202020202020202020202": { "amount": "7" }
        }
    }));
    transport.push_json(json!({}));
    transport.push_json(json!({}));

    let wallet = wallet(transport, &config);
    let (info, received) = wallet.receive_pending().await.unwrap();
    assert_eq!(info.balance, Raw::from(22u128));
    assert_eq!(info.representative, other(1));

    let requests = wallet.client().transport().requests();
    assert_eq!(requests[3]["block"]["previous"], head.hash().unwrap().to_string());
    assert_eq!(requests[4]["block"]["previous"], received[0].hash.to_string());
    assert_eq!(requests[4]["block"]["balance"], "22");
}

#[tokio::test]
async fn nothing_receivable_changes_nothing() {
    let transport = NullTransport::new();
    transport.push_json(json!({ "error": "Account not found" }));
    transport.push_json(json!({ "blocks": "" }));
    let wallet = wallet(transport, &config(WorkSource::Local, 0));
    let (info, received) = wallet.receive_pending().await.unwrap();
    assert!(received.is_empty());
    assert!(!info.is_opened());
    assert_eq!(wallet.client().transport().actions().len(), 2);
}

#[tokio::test]
async fn send_uses_node_work() {
    let head = frontier(5 * NANO, &other(1));
    let transport = NullTransport::new();
    push_opened(&transport, &head, 5 * NANO);
    transport.push_json(json!({ "work": "0123456789abcdef" }));
    transport.push_json(json!({}));

    let wallet = wallet(transport, &config(WorkSource::Node, 0));
    let hash = wallet.send("1.25", &other(9)).await.unwrap();

    let requests = wallet.client().transport().requests();
    let submitted: atto_blocks::JsonBlock =
        serde_json::from_value(requests[3]["block"].clone()).unwrap();
    let block = Block::from_json(BlockKind::Send, &submitted).unwrap();
    assert_eq!(hash, block.hash().unwrap());
    let work = &requests[2];
    assert_eq!(work["action"], "work_generate");
    assert_eq!(work["hash"], head.hash().unwrap().to_string());
    assert!(work.get("difficulty").is_none());

    let process = &requests[3];
    assert_eq!(process["subtype"], "send");
    assert_eq!(process["block"]["work"], "0123456789abcdef");
    assert_eq!(
        process["block"]["balance"],
        (5 * NANO - 125 * NANO / 100).to_string()
    );
    assert_eq!(
        process["block"]["link"],
        other(9).public_key().to_string()
    );
}

#[tokio::test]
async fn receive_asks_node_for_receive_difficulty() {
    let head = frontier(1, &other(1));
    let transport = NullTransport::new();
    push_opened(&transport, &head, 1);
    transport.push_json(json!({
        "blocks": {
            "0404040404040404040404040404040404040404040404040404040404040404": { "amount": "1" }
        }
    }));
    transport.push_json(json!({ "work": "0000000000000001" }));
    transport.push_json(json!({}));

    let wallet = wallet(transport, &config(WorkSource::Node, 0));
    wallet.receive_pending().await.unwrap();
    let work = &wallet.client().transport().requests()[3];
    assert_eq!(work["action"], "work_generate");
    assert_eq!(work["difficulty"], "0000000000000000");
}

#[tokio::test]
async fn overdraft_is_refused_before_submission() {
    let head = frontier(NANO, &other(1));
    let transport = NullTransport::new();
    push_opened(&transport, &head, NANO);
    let wallet = wallet(transport, &config(WorkSource::Local, 0));
    let err = wallet.send("2", &other(9)).await.unwrap_err();
    assert!(matches!(
        err,
        WalletError::Block(BlockError::InsufficientBalance { .. })
    ));
    assert_eq!(wallet.client().transport().requests().len(), 2);
}

#[tokio::test]
async fn send_from_unopened_account_fails() {
    let transport = NullTransport::new();
    transport.push_json(json!({ "error": "Account not found" }));
    let wallet = wallet(transport, &config(WorkSource::Local, 0));
    assert!(matches!(
        wallet.send("1", &other(9)).await,
        Err(WalletError::Block(BlockError::AccountNotOpened))
    ));
}

#[tokio::test]
async fn change_representative_keeps_balance() {
    let head = frontier(42, &other(1));
    let transport = NullTransport::new();
    push_opened(&transport, &head, 42);
    transport.push_json(json!({}));

    let wallet = wallet(transport, &config(WorkSource::Local, 0));
    wallet.change_representative(other(4)).await.unwrap();

    let process = &wallet.client().transport().requests()[2];
    assert_eq!(process["subtype"], "change");
    assert_eq!(process["block"]["representative"], other(4).address());
    assert_eq!(process["block"]["balance"], "42");
    assert_eq!(process["block"]["link"], "0".repeat(64));
}

#[tokio::test]
async fn fallback_computes_locally_when_node_fails() {
    let head = frontier(42, &other(1));
    let transport = NullTransport::new();
    push_opened(&transport, &head, 42);
    transport.push_error(TransportError::Status(500));
    transport.push_json(json!({}));

    let wallet = wallet(transport, &config(WorkSource::LocalFallback, 0));
    wallet.change_representative(other(4)).await.unwrap();
    assert_eq!(
        wallet.client().transport().actions(),
        vec!["account_info", "block_info", "work_generate", "process"]
    );
}

#[tokio::test]
async fn weak_node_work_is_rejected() {
    let head = frontier(42, &other(1));
    let transport = NullTransport::new();
    push_opened(&transport, &head, 42);
    transport.push_json(json!({ "work": "0000000000000000" }));

    let wallet = wallet(transport, &config(WorkSource::Node, u64::MAX));
    let err = wallet.change_representative(other(4)).await.unwrap_err();
    assert!(matches!(err, WalletError::InsufficientWork { threshold: u64::MAX, .. }));
    assert!(!wallet
        .client()
        .transport()
        .actions()
        .contains(&"process".to_string()));
}

#[test]
fn default_thresholds_apply_without_config() {
    let config = WalletConfig::default();
    assert_eq!(config.thresholds(), WorkThresholds::default());
}
