//! Error types for the Waggle protocol core.
//!
//! One enum, one stable kind per failure mode, so callers can match on the
//! variant instead of parsing message strings. The kinds fall into three
//! groups with different recovery policies:
//!
//! - **Local decode errors** (`MalformedInput`, `UnknownVariant`,
//!   `SchemaMismatch`, `InvalidAsset`, `InvalidChainId`) — the input is bad.
//!   Report to the immediate caller with the offending key or field; no
//!   partial value is ever produced.
//! - **Contract violations** (`SealedTransaction`, `AlreadySealed`,
//!   `UnhandledVariant`) — a bug in the calling code. Surface loudly; do
//!   not retry.
//! - **External-service failures** (`SigningFailed`, `BroadcastFailed`,
//!   `RpcFailed`, `AccountNotFound`) — the wallet or node misbehaved. These
//!   are recoverable (retry, unlock, re-fetch) and must never be confused
//!   with the local kinds above. [`ProtocolError::is_external`] encodes the
//!   distinction.

use thiserror::Error;

/// Every failure the protocol core can report.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The operation name in a single-key tagged map is not in the registry.
    #[error("unknown operation variant: {name:?}")]
    UnknownVariant { name: String },

    /// The structured input does not have the required single-key-tagged
    /// shape at the top level.
    #[error("malformed operation input: {reason}")]
    MalformedInput { reason: String },

    /// The variant key was recognized but its payload does not match the
    /// registered schema (missing field, wrong shape, bad nested value).
    #[error("schema mismatch for {variant:?}: {reason}")]
    SchemaMismatch {
        variant: &'static str,
        reason: String,
    },

    /// An asset triple failed validation (bad NAI, precision out of range,
    /// or a magnitude that is not an exact integer string).
    #[error("invalid asset: {reason}")]
    InvalidAsset { reason: String },

    /// A chain id string could not be parsed as 32 hex-encoded bytes.
    #[error("invalid chain id {value:?}: {reason}")]
    InvalidChainId { value: String, reason: String },

    /// `push_operation` was called on a transaction that already carries a
    /// signature.
    #[error("transaction is sealed; operations can no longer be appended")]
    SealedTransaction,

    /// `attach_signature` was called on an already-sealed transaction.
    #[error("transaction is already sealed; a signature is attached")]
    AlreadySealed,

    /// Strict dispatch reached an operation the visitor does not handle.
    #[error("no handler for operation variant {variant:?} in strict mode")]
    UnhandledVariant { variant: &'static str },

    /// The external wallet/signer refused or failed to sign (locked wallet,
    /// unknown key, malformed secret).
    #[error("signing failed: {reason}")]
    SigningFailed { reason: String },

    /// The remote node rejected or failed the broadcast.
    #[error("broadcast failed: {reason}")]
    BroadcastFailed { reason: String },

    /// A chain RPC call other than broadcast failed (metadata, accounts).
    #[error("chain RPC failed: {reason}")]
    RpcFailed { reason: String },

    /// The named account does not exist on the chain.
    #[error("account {account:?} not found")]
    AccountNotFound { account: String },
}

impl ProtocolError {
    /// Returns `true` for failures originating in an external collaborator
    /// (wallet or node). External failures are retryable; local decode
    /// errors and contract violations are not.
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Self::SigningFailed { .. }
                | Self::BroadcastFailed { .. }
                | Self::RpcFailed { .. }
                | Self::AccountNotFound { .. }
        )
    }
}
