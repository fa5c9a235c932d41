//! Single dispatch over the closed operation set.
//!
//! An [`OperationVisitor`] supplies one handler per variant; every handler
//! has a default body that reports [`VisitOutcome::Skipped`], so callers
//! implement only the variants they care about. [`accept`] inspects the
//! active tag and invokes exactly one handler via a single `match` — O(1),
//! no chain of type checks, and adding a variant never breaks existing
//! visitor implementations.
//!
//! Two dispatch modes:
//! - [`accept`] (lenient, the default): unhandled variants are a silent
//!   no-op, reported as `Skipped`.
//! - [`accept_strict`]: unhandled variants are an
//!   [`ProtocolError::UnhandledVariant`] for callers that must account for
//!   every operation (e.g. an indexer that cannot afford to drop one).

use super::types::{
    ClaimRewardBalanceOperation, CommentOperation, LimitOrderCancelOperation, Operation,
    RecurrentTransferOperation, TransferOperation, VoteOperation,
};
use crate::error::ProtocolError;

/// What a handler did with the operation it was offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    /// The visitor supplied a handler and it ran.
    Handled,
    /// The default no-op body ran; the visitor does not handle this variant.
    Skipped,
}

/// One handler per registered operation variant, all defaulting to no-ops.
pub trait OperationVisitor {
    fn vote(&mut self, _op: &VoteOperation) -> VisitOutcome {
        VisitOutcome::Skipped
    }

    fn comment(&mut self, _op: &CommentOperation) -> VisitOutcome {
        VisitOutcome::Skipped
    }

    fn transfer(&mut self, _op: &TransferOperation) -> VisitOutcome {
        VisitOutcome::Skipped
    }

    fn recurrent_transfer(&mut self, _op: &RecurrentTransferOperation) -> VisitOutcome {
        VisitOutcome::Skipped
    }

    fn limit_order_cancel(&mut self, _op: &LimitOrderCancelOperation) -> VisitOutcome {
        VisitOutcome::Skipped
    }

    fn claim_reward_balance(&mut self, _op: &ClaimRewardBalanceOperation) -> VisitOutcome {
        VisitOutcome::Skipped
    }
}

/// Dispatches `op` to exactly the one handler matching its active variant.
pub fn accept(visitor: &mut dyn OperationVisitor, op: &Operation) -> VisitOutcome {
    match op {
        Operation::Vote(p) => visitor.vote(p),
        Operation::Comment(p) => visitor.comment(p),
        Operation::Transfer(p) => visitor.transfer(p),
        Operation::RecurrentTransfer(p) => visitor.recurrent_transfer(p),
        Operation::LimitOrderCancel(p) => visitor.limit_order_cancel(p),
        Operation::ClaimRewardBalance(p) => visitor.claim_reward_balance(p),
    }
}

/// Like [`accept`], but an unhandled variant is an error.
pub fn accept_strict(
    visitor: &mut dyn OperationVisitor,
    op: &Operation,
) -> Result<(), ProtocolError> {
    match accept(visitor, op) {
        VisitOutcome::Handled => Ok(()),
        VisitOutcome::Skipped => Err(ProtocolError::UnhandledVariant {
            variant: op.kind().name(),
        }),
    }
}

impl Operation {
    /// Convenience method form of [`accept`].
    pub fn accept(&self, visitor: &mut dyn OperationVisitor) -> VisitOutcome {
        accept(visitor, self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
