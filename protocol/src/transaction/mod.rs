//! # Transaction Module
//!
//! Ordered assembly of operations into a signable transaction, the
//! canonical byte form an external signer signs over, and the
//! `Open → Sealed` state machine.
//!
//! ## Architecture
//!
//! ```text
//! builder.rs — Transaction container + fluent TransactionBuilder
//! signing.rs — Canonical signable bytes, SHA-256 digest, sign_transaction
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Assemble** — create via [`TransactionBuilder`] or
//!    [`crate::chain::ChainContext::create_transaction`], then
//!    [`Transaction::push_operation`] in execution order.
//! 2. **Sign** — [`sign_transaction`] computes [`signing_digest`] and
//!    delegates to a [`crate::wallet::WalletSigner`].
//! 3. **Seal** — the attached signature freezes the transaction; further
//!    appends fail with `SealedTransaction`.
//! 4. **Broadcast** — handed to the node via
//!    [`crate::chain::ChainRpc::broadcast`] (external).

pub mod builder;
pub mod signing;

pub use builder::{Transaction, TransactionBuilder, TransactionSignature};
pub use signing::{sign_transaction, signable_bytes, signing_digest};
