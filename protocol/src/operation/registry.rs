//! The operation variant registry.
//!
//! A process-wide, read-only table mapping each wire variant name to its
//! payload schema and decode entry point. The table is a `static` slice
//! populated at compile time, so it is shared across threads without any
//! locking and can never be mutated after startup.
//!
//! Adding an operation kind means adding one [`VariantSchema`] entry here
//! (plus the payload struct and a visitor default method) — nothing else
//! changes.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{
    ClaimRewardBalanceOperation, CommentOperation, LimitOrderCancelOperation, Operation,
    OperationKind, RecurrentTransferOperation, TransferOperation, VoteOperation,
};
use crate::error::ProtocolError;

// ---------------------------------------------------------------------------
// Schema model
// ---------------------------------------------------------------------------

/// Semantic type of one payload field, for introspection and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A chain account name. Validated against chain rules by the node,
    /// not here.
    AccountName,
    /// Free-form UTF-8 text (permlinks, memos, bodies, raw JSON strings).
    Text,
    /// A `{nai, precision, amount}` exact-amount triple.
    Asset,
    /// An order-significant list of single-key tagged extension maps.
    ExtensionList,
    Int16,
    UInt16,
    UInt32,
}

/// Name and semantic type of one payload field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// One registered operation variant: its wire name, payload schema, and
/// the function that decodes a payload value into a typed [`Operation`].
#[derive(Debug)]
pub struct VariantSchema {
    pub kind: OperationKind,
    pub fields: &'static [FieldSpec],
    decode: fn(&Value) -> Result<Operation, ProtocolError>,
}

impl VariantSchema {
    /// The wire name this schema is registered under.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Decodes a payload (the value under the single tag key) into a typed
    /// operation of this variant.
    pub fn decode_payload(&self, payload: &Value) -> Result<Operation, ProtocolError> {
        (self.decode)(payload)
    }
}

// ---------------------------------------------------------------------------
// Decode entry points
// ---------------------------------------------------------------------------

fn payload<T: DeserializeOwned>(kind: OperationKind, value: &Value) -> Result<T, ProtocolError> {
    T::deserialize(value).map_err(|e| ProtocolError::SchemaMismatch {
        variant: kind.name(),
        reason: e.to_string(),
    })
}

fn decode_vote(v: &Value) -> Result<Operation, ProtocolError> {
    payload::<VoteOperation>(OperationKind::Vote, v).map(Operation::Vote)
}

fn decode_comment(v: &Value) -> Result<Operation, ProtocolError> {
    payload::<CommentOperation>(OperationKind::Comment, v).map(Operation::Comment)
}

fn decode_transfer(v: &Value) -> Result<Operation, ProtocolError> {
    payload::<TransferOperation>(OperationKind::Transfer, v).map(Operation::Transfer)
}

fn decode_recurrent_transfer(v: &Value) -> Result<Operation, ProtocolError> {
    payload::<RecurrentTransferOperation>(OperationKind::RecurrentTransfer, v)
        .map(Operation::RecurrentTransfer)
}

fn decode_limit_order_cancel(v: &Value) -> Result<Operation, ProtocolError> {
    payload::<LimitOrderCancelOperation>(OperationKind::LimitOrderCancel, v)
        .map(Operation::LimitOrderCancel)
}

fn decode_claim_reward_balance(v: &Value) -> Result<Operation, ProtocolError> {
    payload::<ClaimRewardBalanceOperation>(OperationKind::ClaimRewardBalance, v)
        .map(Operation::ClaimRewardBalance)
}

// ---------------------------------------------------------------------------
// The registry
// ---------------------------------------------------------------------------

static REGISTRY: [VariantSchema; 6] = [
    VariantSchema {
        kind: OperationKind::Vote,
        fields: &[
            FieldSpec { name: "voter", kind: FieldKind::AccountName },
            FieldSpec { name: "author", kind: FieldKind::AccountName },
            FieldSpec { name: "permlink", kind: FieldKind::Text },
            FieldSpec { name: "weight", kind: FieldKind::Int16 },
        ],
        decode: decode_vote,
    },
    VariantSchema {
        kind: OperationKind::Comment,
        fields: &[
            FieldSpec { name: "parent_author", kind: FieldKind::AccountName },
            FieldSpec { name: "parent_permlink", kind: FieldKind::Text },
            FieldSpec { name: "author", kind: FieldKind::AccountName },
            FieldSpec { name: "permlink", kind: FieldKind::Text },
            FieldSpec { name: "title", kind: FieldKind::Text },
            FieldSpec { name: "body", kind: FieldKind::Text },
            FieldSpec { name: "json_metadata", kind: FieldKind::Text },
        ],
        decode: decode_comment,
    },
    VariantSchema {
        kind: OperationKind::Transfer,
        fields: &[
            FieldSpec { name: "from", kind: FieldKind::AccountName },
            FieldSpec { name: "to", kind: FieldKind::AccountName },
            FieldSpec { name: "amount", kind: FieldKind::Asset },
            FieldSpec { name: "memo", kind: FieldKind::Text },
        ],
        decode: decode_transfer,
    },
    VariantSchema {
        kind: OperationKind::RecurrentTransfer,
        fields: &[
            FieldSpec { name: "from", kind: FieldKind::AccountName },
            FieldSpec { name: "to", kind: FieldKind::AccountName },
            FieldSpec { name: "amount", kind: FieldKind::Asset },
            FieldSpec { name: "memo", kind: FieldKind::Text },
            FieldSpec { name: "recurrence", kind: FieldKind::UInt16 },
            FieldSpec { name: "executions", kind: FieldKind::UInt16 },
            FieldSpec { name: "extensions", kind: FieldKind::ExtensionList },
        ],
        decode: decode_recurrent_transfer,
    },
    VariantSchema {
        kind: OperationKind::LimitOrderCancel,
        fields: &[
            FieldSpec { name: "owner", kind: FieldKind::AccountName },
            FieldSpec { name: "orderid", kind: FieldKind::UInt32 },
        ],
        decode: decode_limit_order_cancel,
    },
    VariantSchema {
        kind: OperationKind::ClaimRewardBalance,
        fields: &[
            FieldSpec { name: "account", kind: FieldKind::AccountName },
            FieldSpec { name: "reward_hive", kind: FieldKind::Asset },
            FieldSpec { name: "reward_hbd", kind: FieldKind::Asset },
            FieldSpec { name: "reward_vests", kind: FieldKind::Asset },
        ],
        decode: decode_claim_reward_balance,
    },
];

/// All registered schemas, in registration order.
pub fn variants() -> &'static [VariantSchema] {
    &REGISTRY
}

/// Looks up the schema registered under `name`.
///
/// # Errors
///
/// [`ProtocolError::UnknownVariant`] when `name` is not registered.
pub fn lookup(name: &str) -> Result<&'static VariantSchema, ProtocolError> {
    REGISTRY
        .iter()
        .find(|schema| schema.name() == name)
        .ok_or_else(|| ProtocolError::UnknownVariant {
            name: name.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
