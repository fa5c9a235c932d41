//! The chain seam: metadata, RPC trait, and the explicitly passed context.
//!
//! Network access is an external collaborator. This module defines the
//! narrow contract the core depends on ([`ChainRpc`]) and the value types
//! that cross it. [`ChainContext`] replaces the module-level "shared chain
//! connection" singleton pattern: it is constructed once at process start,
//! holds the chain id, and is passed explicitly to everything that needs
//! to anchor or sign a transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::asset::Asset;
use crate::config::{default_transaction_lifetime, CHAIN_ID_LENGTH, MAINNET_CHAIN_ID};
use crate::error::ProtocolError;
use crate::transaction::{Transaction, TransactionBuilder};

// ---------------------------------------------------------------------------
// ChainId
// ---------------------------------------------------------------------------

/// A 256-bit chain identifier, mixed into every signing digest so that a
/// signature is only valid on the network it was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId([u8; CHAIN_ID_LENGTH]);

impl ChainId {
    /// Parses a 64-character hex string.
    pub fn from_hex(value: &str) -> Result<Self, ProtocolError> {
        let bytes = hex::decode(value).map_err(|e| ProtocolError::InvalidChainId {
            value: value.to_string(),
            reason: e.to_string(),
        })?;
        let bytes: [u8; CHAIN_ID_LENGTH] =
            bytes
                .try_into()
                .map_err(|b: Vec<u8>| ProtocolError::InvalidChainId {
                    value: value.to_string(),
                    reason: format!("expected {CHAIN_ID_LENGTH} bytes, got {}", b.len()),
                })?;
        Ok(Self(bytes))
    }

    /// The well-known mainnet chain id.
    pub fn mainnet() -> Self {
        Self::from_hex(MAINNET_CHAIN_ID).expect("MAINNET_CHAIN_ID constant is 64 hex chars")
    }

    pub fn as_bytes(&self) -> &[u8; CHAIN_ID_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// RPC value types
// ---------------------------------------------------------------------------

/// What the core needs from a node to anchor a new transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainMetadata {
    pub chain_id: ChainId,
    /// Low 16 bits of the reference block number.
    pub ref_block_num: u16,
    /// Bytes 4..8 of the reference block id, little-endian.
    pub ref_block_prefix: u32,
    /// Timestamp of the current head block; expirations are computed
    /// relative to chain time, not local wall clocks.
    pub head_block_time: DateTime<Utc>,
}

/// Node acknowledgement of an accepted broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastAck {
    /// The transaction id assigned by the node.
    pub transaction_id: String,
}

/// An account's pending reward balances, as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRewards {
    pub account: String,
    pub reward_hive: Asset,
    pub reward_hbd: Asset,
    pub reward_vests: Asset,
}

// ---------------------------------------------------------------------------
// ChainRpc
// ---------------------------------------------------------------------------

/// The remote node, reduced to the three calls this core depends on.
///
/// Implementations live outside this crate (HTTP JSON-RPC, test doubles).
/// Transport failures surface as [`ProtocolError::RpcFailed`] or
/// [`ProtocolError::BroadcastFailed`]; both are retryable and distinct
/// from local decode errors.
pub trait ChainRpc {
    /// Chain id plus reference-block data for anchoring new transactions.
    fn chain_metadata(&self) -> Result<ChainMetadata, ProtocolError>;

    /// Pending reward balances for `account`, or `None` if the account
    /// does not exist.
    fn account_rewards(&self, account: &str) -> Result<Option<AccountRewards>, ProtocolError>;

    /// Submits a sealed transaction for inclusion.
    fn broadcast(&self, tx: &Transaction) -> Result<BroadcastAck, ProtocolError>;
}

// ---------------------------------------------------------------------------
// ChainContext
// ---------------------------------------------------------------------------

/// Explicitly constructed chain handle: the chain id plus the helpers that
/// need it. Create one at startup and pass it around; it is read-only and
/// freely shareable across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainContext {
    chain_id: ChainId,
}

impl ChainContext {
    /// A context for a known chain id (offline use, tests).
    pub fn new(chain_id: ChainId) -> Self {
        Self { chain_id }
    }

    /// A context whose chain id is fetched from the node once, up front.
    pub fn connect(rpc: &dyn ChainRpc) -> Result<Self, ProtocolError> {
        let metadata = rpc.chain_metadata()?;
        tracing::debug!(chain_id = %metadata.chain_id, "chain context established");
        Ok(Self {
            chain_id: metadata.chain_id,
        })
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Builds an open transaction anchored to the node's current head
    /// block, with the default expiration window applied to chain time.
    pub fn create_transaction(&self, rpc: &dyn ChainRpc) -> Result<Transaction, ProtocolError> {
        let metadata = rpc.chain_metadata()?;
        Ok(TransactionBuilder::new()
            .reference_block(metadata.ref_block_num, metadata.ref_block_prefix)
            .expires_after(metadata.head_block_time, default_transaction_lifetime())
            .build())
    }

    /// Broadcasts a sealed transaction. Refuses unsealed transactions
    /// locally rather than burning a round trip on a guaranteed rejection.
    pub fn broadcast(
        &self,
        rpc: &dyn ChainRpc,
        tx: &Transaction,
    ) -> Result<BroadcastAck, ProtocolError> {
        if !tx.is_sealed() {
            return Err(ProtocolError::BroadcastFailed {
                reason: "refusing to broadcast an unsigned transaction".to_string(),
            });
        }
        let ack = rpc.broadcast(tx)?;
        tracing::info!(transaction_id = %ack.transaction_id, "transaction broadcast accepted");
        Ok(ack)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TESTNET_CHAIN_ID;
    use chrono::TimeZone;

    /// Canned-response node for exercising the context without a network.
    struct FixedRpc {
        metadata: ChainMetadata,
    }

    impl FixedRpc {
        fn new() -> Self {
            Self {
                metadata: ChainMetadata {
                    chain_id: ChainId::from_hex(TESTNET_CHAIN_ID).unwrap(),
                    ref_block_num: 4660,
                    ref_block_prefix: 0xdead_beef,
                    head_block_time: Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap(),
                },
            }
        }
    }

    impl ChainRpc for FixedRpc {
        fn chain_metadata(&self) -> Result<ChainMetadata, ProtocolError> {
            Ok(self.metadata.clone())
        }

        fn account_rewards(
            &self,
            _account: &str,
        ) -> Result<Option<AccountRewards>, ProtocolError> {
            Ok(None)
        }

        fn broadcast(&self, _tx: &Transaction) -> Result<BroadcastAck, ProtocolError> {
            Ok(BroadcastAck {
                transaction_id: "abc123".to_string(),
            })
        }
    }

    #[test]
    fn chain_id_roundtrips_through_hex() {
        let id = ChainId::from_hex(MAINNET_CHAIN_ID).unwrap();
        assert_eq!(id.to_hex(), MAINNET_CHAIN_ID);
        assert_eq!(ChainId::mainnet(), id);
    }

    #[test]
    fn chain_id_rejects_bad_input() {
        assert!(matches!(
            ChainId::from_hex("beef"),
            Err(ProtocolError::InvalidChainId { .. })
        ));
        assert!(matches!(
            ChainId::from_hex("zz"),
            Err(ProtocolError::InvalidChainId { .. })
        ));
    }

    #[test]
    fn connect_captures_the_node_chain_id() {
        let rpc = FixedRpc::new();
        let ctx = ChainContext::connect(&rpc).unwrap();
        assert_eq!(ctx.chain_id().to_hex(), TESTNET_CHAIN_ID);
    }

    #[test]
    fn create_transaction_anchors_to_head_block() {
        let rpc = FixedRpc::new();
        let ctx = ChainContext::connect(&rpc).unwrap();
        let tx = ctx.create_transaction(&rpc).unwrap();

        assert_eq!(tx.ref_block_num, 4660);
        assert_eq!(tx.ref_block_prefix, 0xdead_beef);
        assert_eq!(
            tx.expiration,
            rpc.metadata.head_block_time + default_transaction_lifetime()
        );
        assert!(tx.operations().is_empty());
        assert!(!tx.is_sealed());
    }

    #[test]
    fn broadcast_refuses_unsigned_transactions() {
        let rpc = FixedRpc::new();
        let ctx = ChainContext::connect(&rpc).unwrap();
        let tx = ctx.create_transaction(&rpc).unwrap();

        match ctx.broadcast(&rpc, &tx) {
            Err(ProtocolError::BroadcastFailed { reason }) => {
                assert!(reason.contains("unsigned"));
            }
            other => panic!("expected BroadcastFailed, got {other:?}"),
        }
    }

    #[test]
    fn broadcast_passes_sealed_transactions_through() {
        let rpc = FixedRpc::new();
        let ctx = ChainContext::connect(&rpc).unwrap();
        let mut tx = ctx.create_transaction(&rpc).unwrap();
        tx.attach_signature(hex::encode([7u8; 64]), "key".into())
            .unwrap();

        let ack = ctx.broadcast(&rpc, &tx).unwrap();
        assert_eq!(ack.transaction_id, "abc123");
    }
}
