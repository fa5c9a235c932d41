//! Reward-balance claiming.
//!
//! Builds `claim_reward_balance` operations from an account's pending
//! reward balances and, for callers that want the whole flow, drives
//! fetch → assemble → sign → broadcast through the chain and wallet seams.
//!
//! When all three reward balances are zero there is nothing to claim and
//! the result is `None`. This is an intentional business rule, not an
//! error: claiming is routinely run on a schedule and "no rewards today"
//! is a normal outcome.

use crate::chain::{AccountRewards, BroadcastAck, ChainContext, ChainRpc};
use crate::error::ProtocolError;
use crate::operation::{ClaimRewardBalanceOperation, Operation};
use crate::transaction::sign_transaction;
use crate::wallet::WalletSigner;

/// Builds the claim operation for `rewards`, or `None` when all three
/// balances are zero.
pub fn claim_operation(rewards: &AccountRewards) -> Option<Operation> {
    if rewards.reward_hive.is_zero()
        && rewards.reward_hbd.is_zero()
        && rewards.reward_vests.is_zero()
    {
        return None;
    }
    Some(Operation::ClaimRewardBalance(ClaimRewardBalanceOperation {
        account: rewards.account.clone(),
        reward_hive: rewards.reward_hive.clone(),
        reward_hbd: rewards.reward_hbd.clone(),
        reward_vests: rewards.reward_vests.clone(),
    }))
}

/// Claims everything `account` has pending: fetches the reward balances,
/// assembles and signs a one-operation transaction, and broadcasts it.
///
/// Returns `Ok(None)` when there is nothing to claim (see module docs),
/// `Ok(Some(ack))` on a successful broadcast.
///
/// # Errors
///
/// - [`ProtocolError::AccountNotFound`] if the node does not know the
///   account.
/// - [`ProtocolError::RpcFailed`] / [`ProtocolError::BroadcastFailed`] /
///   [`ProtocolError::SigningFailed`] from the external collaborators; all
///   retryable.
pub fn claim_pending_rewards(
    ctx: &ChainContext,
    rpc: &dyn ChainRpc,
    wallet: &dyn WalletSigner,
    account: &str,
    public_key_hint: &str,
) -> Result<Option<BroadcastAck>, ProtocolError> {
    let rewards = rpc
        .account_rewards(account)?
        .ok_or_else(|| ProtocolError::AccountNotFound {
            account: account.to_string(),
        })?;

    tracing::info!(
        account,
        hive = %rewards.reward_hive,
        hbd = %rewards.reward_hbd,
        vests = %rewards.reward_vests,
        "pending rewards"
    );

    let Some(op) = claim_operation(&rewards) else {
        tracing::info!(account, "no rewards to claim");
        return Ok(None);
    };

    let mut tx = ctx.create_transaction(rpc)?;
    tx.push_operation(op)?;
    sign_transaction(&mut tx, &ctx.chain_id(), wallet, public_key_hint)?;
    let ack = ctx.broadcast(rpc, &tx)?;
    Ok(Some(ack))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Asset;
    use crate::chain::{ChainId, ChainMetadata};
    use crate::config::TESTNET_CHAIN_ID;
    use crate::transaction::Transaction;
    use crate::wallet::SoftWallet;
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;

    fn rewards(hive: i64, hbd: i64, vests: i64) -> AccountRewards {
        AccountRewards {
            account: "alice".to_string(),
            reward_hive: Asset::hive(hive),
            reward_hbd: Asset::hbd(hbd),
            reward_vests: Asset::vests(vests),
        }
    }

    /// Test node: serves one account's rewards and records broadcasts.
    struct StubRpc {
        rewards: Option<AccountRewards>,
        broadcasts: RefCell<Vec<Transaction>>,
    }

    impl StubRpc {
        fn new(rewards: Option<AccountRewards>) -> Self {
            Self {
                rewards,
                broadcasts: RefCell::new(Vec::new()),
            }
        }
    }

    impl ChainRpc for StubRpc {
        fn chain_metadata(&self) -> Result<ChainMetadata, ProtocolError> {
            Ok(ChainMetadata {
                chain_id: ChainId::from_hex(TESTNET_CHAIN_ID).unwrap(),
                ref_block_num: 100,
                ref_block_prefix: 0x0102_0304,
                head_block_time: Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap(),
            })
        }

        fn account_rewards(
            &self,
            account: &str,
        ) -> Result<Option<AccountRewards>, ProtocolError> {
            Ok(self
                .rewards
                .clone()
                .filter(|r| r.account == account))
        }

        fn broadcast(&self, tx: &Transaction) -> Result<BroadcastAck, ProtocolError> {
            self.broadcasts.borrow_mut().push(tx.clone());
            Ok(BroadcastAck {
                transaction_id: "claimed".to_string(),
            })
        }
    }

    #[test]
    fn all_zero_balances_build_no_operation() {
        assert!(claim_operation(&rewards(0, 0, 0)).is_none());
    }

    #[test]
    fn any_nonzero_balance_builds_the_claim() {
        for (hive, hbd, vests) in [(1, 0, 0), (0, 1, 0), (0, 0, 1), (5, 7, 9)] {
            let op = claim_operation(&rewards(hive, hbd, vests)).unwrap();
            let Operation::ClaimRewardBalance(claim) = op else {
                panic!("expected claim_reward_balance");
            };
            assert_eq!(claim.account, "alice");
            assert_eq!(claim.reward_hive, Asset::hive(hive));
            assert_eq!(claim.reward_hbd, Asset::hbd(hbd));
            assert_eq!(claim.reward_vests, Asset::vests(vests));
        }
    }

    #[test]
    fn zero_rewards_are_a_noop_not_an_error() {
        let rpc = StubRpc::new(Some(rewards(0, 0, 0)));
        let ctx = ChainContext::connect(&rpc).unwrap();
        let mut wallet = SoftWallet::new();
        let key = wallet.generate();

        let result = claim_pending_rewards(&ctx, &rpc, &wallet, "alice", &key).unwrap();
        assert!(result.is_none());
        assert!(rpc.broadcasts.borrow().is_empty());
    }

    #[test]
    fn pending_rewards_are_claimed_and_broadcast() {
        let rpc = StubRpc::new(Some(rewards(1_000, 0, 250)));
        let ctx = ChainContext::connect(&rpc).unwrap();
        let mut wallet = SoftWallet::new();
        let key = wallet.generate();

        let ack = claim_pending_rewards(&ctx, &rpc, &wallet, "alice", &key)
            .unwrap()
            .expect("rewards were pending");
        assert_eq!(ack.transaction_id, "claimed");

        let broadcasts = rpc.broadcasts.borrow();
        assert_eq!(broadcasts.len(), 1);
        let tx = &broadcasts[0];
        assert!(tx.is_sealed());
        assert_eq!(tx.operations().len(), 1);
        assert!(matches!(
            tx.operations()[0],
            Operation::ClaimRewardBalance(_)
        ));
    }

    #[test]
    fn missing_account_is_reported() {
        let rpc = StubRpc::new(None);
        let ctx = ChainContext::connect(&rpc).unwrap();
        let mut wallet = SoftWallet::new();
        let key = wallet.generate();

        match claim_pending_rewards(&ctx, &rpc, &wallet, "ghost", &key) {
            Err(ProtocolError::AccountNotFound { account }) => assert_eq!(account, "ghost"),
            other => panic!("expected AccountNotFound, got {other:?}"),
        }
    }

    #[test]
    fn signing_failure_aborts_before_broadcast() {
        let rpc = StubRpc::new(Some(rewards(1, 0, 0)));
        let ctx = ChainContext::connect(&rpc).unwrap();
        let wallet = SoftWallet::new(); // empty: every hint is unknown

        match claim_pending_rewards(&ctx, &rpc, &wallet, "alice", "deadbeef") {
            Err(ProtocolError::SigningFailed { .. }) => {}
            other => panic!("expected SigningFailed, got {other:?}"),
        }
        assert!(rpc.broadcasts.borrow().is_empty());
    }
}
