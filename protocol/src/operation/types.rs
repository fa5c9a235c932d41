//! The closed operation set and its payload schemas.
//!
//! [`Operation`] is an externally tagged union: on the wire each operation
//! is a single-key map, `{"vote": {...}}`, which is exactly serde's external
//! enum representation. The payload structs use the chain's field names
//! (`from`/`to` on the wire, `from_account`/`to_account` in Rust, since
//! `from` is a reserved word people trip over).
//!
//! Adding an operation kind touches three places: a payload struct and enum
//! arm here, a schema entry in [`super::registry`], and a default method on
//! [`super::visitor::OperationVisitor`]. Existing visitor implementations
//! keep compiling.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::asset::Asset;

// ---------------------------------------------------------------------------
// OperationKind
// ---------------------------------------------------------------------------

/// Discriminant for the active variant of an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Vote,
    Comment,
    Transfer,
    RecurrentTransfer,
    LimitOrderCancel,
    ClaimRewardBalance,
}

impl OperationKind {
    /// All registered kinds, in wire-tag order.
    pub const ALL: [OperationKind; 6] = [
        OperationKind::Vote,
        OperationKind::Comment,
        OperationKind::Transfer,
        OperationKind::LimitOrderCancel,
        OperationKind::ClaimRewardBalance,
        OperationKind::RecurrentTransfer,
    ];

    /// The snake_case wire name, as it appears as the single tag key.
    pub fn name(self) -> &'static str {
        match self {
            Self::Vote => "vote",
            Self::Comment => "comment",
            Self::Transfer => "transfer",
            Self::RecurrentTransfer => "recurrent_transfer",
            Self::LimitOrderCancel => "limit_order_cancel",
            Self::ClaimRewardBalance => "claim_reward_balance",
        }
    }

    /// The numeric discriminant used in the canonical signing bytes. These
    /// match the chain's own operation ids, so digests are stable even if
    /// the Rust enum is ever reordered.
    pub fn tag(self) -> u8 {
        match self {
            Self::Vote => 0,
            Self::Comment => 1,
            Self::Transfer => 2,
            Self::LimitOrderCancel => 6,
            Self::ClaimRewardBalance => 39,
            Self::RecurrentTransfer => 49,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Upvote or downvote a post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOperation {
    pub voter: String,
    pub author: String,
    pub permlink: String,
    /// Vote strength in basis points of voting power, negative for a
    /// downvote. The chain caps this at +/-10000.
    pub weight: i16,
}

/// Create or edit a post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentOperation {
    /// Empty string for a top-level post.
    pub parent_author: String,
    /// Community/category for a top-level post, parent permlink otherwise.
    pub parent_permlink: String,
    pub author: String,
    pub permlink: String,
    pub title: String,
    pub body: String,
    /// Raw JSON string, opaque to consensus.
    pub json_metadata: String,
}

/// Move liquid funds between two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOperation {
    #[serde(rename = "from")]
    pub from_account: String,
    #[serde(rename = "to")]
    pub to_account: String,
    pub amount: Asset,
    pub memo: String,
}

/// A transfer the chain re-executes on a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrentTransferOperation {
    #[serde(rename = "from")]
    pub from_account: String,
    #[serde(rename = "to")]
    pub to_account: String,
    pub amount: Asset,
    pub memo: String,
    /// Hours between executions.
    pub recurrence: u16,
    /// Number of remaining executions.
    pub executions: u16,
    /// Order-significant extension list. Defaults to empty when the field
    /// is absent from the wire.
    #[serde(default)]
    pub extensions: Vec<RecurrentTransferExtension>,
}

/// Cancel an open limit order by owner and order id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderCancelOperation {
    pub owner: String,
    pub orderid: u32,
}

/// Move accrued author/curation rewards into an account's balances.
/// All three reward assets must be listed, zero or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRewardBalanceOperation {
    pub account: String,
    pub reward_hive: Asset,
    pub reward_hbd: Asset,
    pub reward_vests: Asset,
}

// ---------------------------------------------------------------------------
// Extensions
// ---------------------------------------------------------------------------

/// Extension variants for [`RecurrentTransferOperation`]. Also a closed
/// tagged union, encoded as single-key tagged maps like operations are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrentTransferExtension {
    RecurrentTransferPairId(RecurrentTransferPairId),
}

/// Distinguishes multiple concurrent recurrent transfers between the same
/// pair of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrentTransferPairId {
    pub pair_id: u32,
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// One instruction within a transaction. Exactly one variant is active.
///
/// Serde's external tagging gives the wire form `{"vote": {...}}` directly;
/// [`super::decoder::decode_operation`] wraps deserialization to report the
/// precise failure kind (malformed shape vs unknown variant vs schema
/// mismatch) instead of a generic serde message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Vote(VoteOperation),
    Comment(CommentOperation),
    Transfer(TransferOperation),
    RecurrentTransfer(RecurrentTransferOperation),
    LimitOrderCancel(LimitOrderCancelOperation),
    ClaimRewardBalance(ClaimRewardBalanceOperation),
}

impl Operation {
    /// The active variant's discriminant.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Vote(_) => OperationKind::Vote,
            Self::Comment(_) => OperationKind::Comment,
            Self::Transfer(_) => OperationKind::Transfer,
            Self::RecurrentTransfer(_) => OperationKind::RecurrentTransfer,
            Self::LimitOrderCancel(_) => OperationKind::LimitOrderCancel,
            Self::ClaimRewardBalance(_) => OperationKind::ClaimRewardBalance,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
