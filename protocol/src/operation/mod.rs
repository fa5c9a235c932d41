//! # Operation Module
//!
//! The closed set of chain operations and everything that moves them
//! around: the variant registry, the structured decoder, and the visitor
//! dispatcher.
//!
//! ## Architecture
//!
//! ```text
//! types.rs    — Operation enum, payload structs, extension unions
//! registry.rs — Read-only variant table: wire name → schema + decode fn
//! decoder.rs  — Single-key tagged JSON → typed Operation, distinct errors
//! visitor.rs  — Per-variant handlers with default no-ops, O(1) dispatch
//! ```
//!
//! ## Wire Encoding
//!
//! Every operation is a single-key tagged map, `{"vote": {...}}`, matching
//! the chain's JSON encoding. Decoding enforces exactly one key at the top
//! level and recursively applies the same rule to extension lists.

pub mod decoder;
pub mod registry;
pub mod types;
pub mod visitor;

pub use decoder::{decode_operation, decode_operations};
pub use registry::{lookup, variants, FieldKind, FieldSpec, VariantSchema};
pub use types::{
    ClaimRewardBalanceOperation, CommentOperation, LimitOrderCancelOperation, Operation,
    OperationKind, RecurrentTransferExtension, RecurrentTransferOperation,
    RecurrentTransferPairId, TransferOperation, VoteOperation,
};
pub use visitor::{accept, accept_strict, OperationVisitor, VisitOutcome};
