//! Transaction assembly and the open/sealed state machine.
//!
//! A [`Transaction`] is an ordered bundle of operations plus the chain
//! metadata (TaPoS reference block, expiration) that anchors it to a
//! specific fork. Operations execute in insertion order, so order is part
//! of the contract and is preserved everywhere.
//!
//! The lifecycle is `Open → Sealed`, with no way back: a transaction is
//! mutable until a signature is attached and frozen afterwards. Violations
//! ([`push_operation`](Transaction::push_operation) on a sealed transaction,
//! double [`attach_signature`](Transaction::attach_signature)) are reported
//! as errors, never silently accepted — they indicate a bug in the caller.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{default_transaction_lifetime, SIGNATURE_LENGTH};
use crate::error::ProtocolError;
use crate::operation::Operation;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A signature attached to a sealed transaction, together with the public
/// key that produced it. Both hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSignature {
    pub signature: String,
    pub public_key: String,
}

/// An ordered, signable bundle of operations.
///
/// The TaPoS fields (`ref_block_num`, `ref_block_prefix`) reference a
/// recent block so the chain can reject transactions built on a stale or
/// competing fork. `expiration` bounds how long the transaction stays
/// broadcastable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Low 16 bits of the reference block number.
    pub ref_block_num: u16,
    /// Bytes 4..8 of the reference block id, little-endian.
    pub ref_block_prefix: u32,
    /// Instant after which the chain refuses the transaction.
    pub expiration: DateTime<Utc>,
    operations: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature: Option<TransactionSignature>,
}

impl Transaction {
    /// Creates an empty, open transaction.
    pub fn new(ref_block_num: u16, ref_block_prefix: u32, expiration: DateTime<Utc>) -> Self {
        Self {
            ref_block_num,
            ref_block_prefix,
            expiration,
            operations: Vec::new(),
            signature: None,
        }
    }

    /// Appends an operation, preserving insertion order. O(1) amortized.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::SealedTransaction`] once a signature is attached.
    /// This is a caller bug; do not retry.
    pub fn push_operation(&mut self, op: Operation) -> Result<(), ProtocolError> {
        if self.is_sealed() {
            return Err(ProtocolError::SealedTransaction);
        }
        self.operations.push(op);
        Ok(())
    }

    /// The operations in insertion (and execution) order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// `true` once a signature has been attached.
    pub fn is_sealed(&self) -> bool {
        self.signature.is_some()
    }

    /// The attached signature, if sealed.
    pub fn signature(&self) -> Option<&TransactionSignature> {
        self.signature.as_ref()
    }

    /// Attaches a signature and seals the transaction. `signature` is the
    /// hex-encoded signature bytes; `public_key` identifies the key that
    /// produced them.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::AlreadySealed`] on a second call. Caller bug.
    /// - [`ProtocolError::SigningFailed`] if the signature is not
    ///   `SIGNATURE_LENGTH` bytes of valid hex — a broken signer response
    ///   must not seal the transaction.
    pub fn attach_signature(
        &mut self,
        signature: String,
        public_key: String,
    ) -> Result<(), ProtocolError> {
        if self.is_sealed() {
            return Err(ProtocolError::AlreadySealed);
        }
        match hex::decode(&signature) {
            Ok(bytes) if bytes.len() == SIGNATURE_LENGTH => {}
            Ok(bytes) => {
                return Err(ProtocolError::SigningFailed {
                    reason: format!(
                        "signer returned {} bytes, expected {SIGNATURE_LENGTH}",
                        bytes.len()
                    ),
                })
            }
            Err(e) => {
                return Err(ProtocolError::SigningFailed {
                    reason: format!("signer returned non-hex signature: {e}"),
                })
            }
        }
        self.signature = Some(TransactionSignature {
            signature,
            public_key,
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for open [`Transaction`]s.
///
/// # Usage
///
/// ```rust,no_run
/// use waggle_protocol::transaction::TransactionBuilder;
/// use waggle_protocol::operation::{Operation, VoteOperation};
///
/// let tx = TransactionBuilder::new()
///     .reference_block(4660, 0xdeadbeef)
///     .push_operation(Operation::Vote(VoteOperation {
///         voter: "alice".into(),
///         author: "bob".into(),
///         permlink: "/".into(),
///         weight: 10_000,
///     }))
///     .build();
/// ```
///
/// When no expiration is given, `build()` stamps the default lifetime from
/// the current UTC time.
pub struct TransactionBuilder {
    ref_block_num: u16,
    ref_block_prefix: u32,
    expiration: Option<DateTime<Utc>>,
    lifetime: Duration,
    operations: Vec<Operation>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self {
            ref_block_num: 0,
            ref_block_prefix: 0,
            expiration: None,
            lifetime: default_transaction_lifetime(),
            operations: Vec::new(),
        }
    }

    /// Sets the TaPoS reference block fields.
    pub fn reference_block(mut self, num: u16, prefix: u32) -> Self {
        self.ref_block_num = num;
        self.ref_block_prefix = prefix;
        self
    }

    /// Sets the expiration instant explicitly.
    pub fn expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Sets expiration to `base + lifetime`, typically from the head block
    /// time reported by the node.
    pub fn expires_after(mut self, base: DateTime<Utc>, lifetime: Duration) -> Self {
        self.expiration = Some(base + lifetime);
        self
    }

    /// Appends an operation. Order is preserved into the built transaction.
    pub fn push_operation(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    /// Produces an open, unsigned transaction.
    pub fn build(self) -> Transaction {
        let expiration = self
            .expiration
            .unwrap_or_else(|| Utc::now() + self.lifetime);
        Transaction {
            ref_block_num: self.ref_block_num,
            ref_block_prefix: self.ref_block_prefix,
            expiration,
            operations: self.operations,
            signature: None,
        }
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
