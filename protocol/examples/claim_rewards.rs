//! Walkthrough of the reward-claiming flow against a stub node.
//!
//! Demonstrates the seams a real deployment would fill in: a `ChainRpc`
//! implementation talking JSON-RPC to a node, and a `WalletSigner` backed
//! by a wallet service. Here both are in-process so the example runs
//! offline.
//!
//! Run with:
//!   cargo run --example claim_rewards

use chrono::{TimeZone, Utc};
use std::cell::RefCell;

use waggle_protocol::asset::Asset;
use waggle_protocol::chain::{
    AccountRewards, BroadcastAck, ChainContext, ChainId, ChainMetadata, ChainRpc,
};
use waggle_protocol::config::TESTNET_CHAIN_ID;
use waggle_protocol::error::ProtocolError;
use waggle_protocol::rewards::claim_pending_rewards;
use waggle_protocol::transaction::Transaction;
use waggle_protocol::wallet::SoftWallet;

/// A node that owes alice some rewards.
struct DemoNode {
    broadcasts: RefCell<Vec<Transaction>>,
}

impl ChainRpc for DemoNode {
    fn chain_metadata(&self) -> Result<ChainMetadata, ProtocolError> {
        Ok(ChainMetadata {
            chain_id: ChainId::from_hex(TESTNET_CHAIN_ID).expect("constant"),
            ref_block_num: 4660,
            ref_block_prefix: 0xdead_beef,
            head_block_time: Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap(),
        })
    }

    fn account_rewards(&self, account: &str) -> Result<Option<AccountRewards>, ProtocolError> {
        if account != "alice" {
            return Ok(None);
        }
        Ok(Some(AccountRewards {
            account: account.to_string(),
            reward_hive: Asset::hive(1_250),
            reward_hbd: Asset::hbd(0),
            reward_vests: Asset::vests(8_403_118),
        }))
    }

    fn broadcast(&self, tx: &Transaction) -> Result<BroadcastAck, ProtocolError> {
        self.broadcasts.borrow_mut().push(tx.clone());
        Ok(BroadcastAck {
            transaction_id: "9f2c41d0".to_string(),
        })
    }
}

fn main() -> Result<(), ProtocolError> {
    let node = DemoNode {
        broadcasts: RefCell::new(Vec::new()),
    };
    let ctx = ChainContext::connect(&node)?;
    println!("connected to chain {}", ctx.chain_id());

    let mut wallet = SoftWallet::new();
    let public_key = wallet.generate();
    println!("signing key {public_key}");

    match claim_pending_rewards(&ctx, &node, &wallet, "alice", &public_key)? {
        Some(ack) => {
            println!("claimed; node assigned transaction id {}", ack.transaction_id);
            let broadcasts = node.broadcasts.borrow();
            let tx = &broadcasts[0];
            println!(
                "broadcast transaction:\n{}",
                serde_json::to_string_pretty(tx).expect("transaction serializes")
            );
        }
        None => println!("nothing to claim today"),
    }

    Ok(())
}
