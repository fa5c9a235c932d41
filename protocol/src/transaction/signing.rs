//! Canonical signing bytes and signature attachment.
//!
//! The cryptographic operation itself is delegated to a [`WalletSigner`];
//! this module's job is to produce the exact bytes the signer must sign
//! over, deterministically. [`signable_bytes`] is a fixed binary layout —
//! chain id first (network replay protection), then TaPoS fields, then
//! each operation behind its wire tag, with little-endian fixed-width
//! integers and u32-length-prefixed strings. JSON is deliberately not used
//! here: key order is not guaranteed across serializers, and the digest
//! must be byte-identical on every call.
//!
//! The signature and public key are excluded from the signable bytes, so
//! sealing does not change the digest.

use sha2::{Digest, Sha256};

use super::builder::Transaction;
use crate::asset::Asset;
use crate::chain::ChainId;
use crate::error::ProtocolError;
use crate::operation::{Operation, RecurrentTransferExtension};
use crate::wallet::WalletSigner;

// ---------------------------------------------------------------------------
// Canonical encoding
// ---------------------------------------------------------------------------

fn put_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

fn put_asset(buf: &mut Vec<u8>, asset: &Asset) {
    put_str(buf, &asset.nai);
    buf.push(asset.precision);
    put_str(buf, &asset.amount);
}

fn encode_operation(buf: &mut Vec<u8>, op: &Operation) {
    buf.push(op.kind().tag());
    match op {
        Operation::Vote(p) => {
            put_str(buf, &p.voter);
            put_str(buf, &p.author);
            put_str(buf, &p.permlink);
            buf.extend_from_slice(&p.weight.to_le_bytes());
        }
        Operation::Comment(p) => {
            put_str(buf, &p.parent_author);
            put_str(buf, &p.parent_permlink);
            put_str(buf, &p.author);
            put_str(buf, &p.permlink);
            put_str(buf, &p.title);
            put_str(buf, &p.body);
            put_str(buf, &p.json_metadata);
        }
        Operation::Transfer(p) => {
            put_str(buf, &p.from_account);
            put_str(buf, &p.to_account);
            put_asset(buf, &p.amount);
            put_str(buf, &p.memo);
        }
        Operation::RecurrentTransfer(p) => {
            put_str(buf, &p.from_account);
            put_str(buf, &p.to_account);
            put_asset(buf, &p.amount);
            put_str(buf, &p.memo);
            buf.extend_from_slice(&p.recurrence.to_le_bytes());
            buf.extend_from_slice(&p.executions.to_le_bytes());
            buf.extend_from_slice(&(p.extensions.len() as u32).to_le_bytes());
            for ext in &p.extensions {
                match ext {
                    RecurrentTransferExtension::RecurrentTransferPairId(pair) => {
                        buf.push(0x00);
                        buf.extend_from_slice(&pair.pair_id.to_le_bytes());
                    }
                }
            }
        }
        Operation::LimitOrderCancel(p) => {
            put_str(buf, &p.owner);
            buf.extend_from_slice(&p.orderid.to_le_bytes());
        }
        Operation::ClaimRewardBalance(p) => {
            put_str(buf, &p.account);
            put_asset(buf, &p.reward_hive);
            put_asset(buf, &p.reward_hbd);
            put_asset(buf, &p.reward_vests);
        }
    }
}

/// The canonical byte form an external signer must sign over.
///
/// Layout: 32-byte chain id, `ref_block_num` (u16 LE), `ref_block_prefix`
/// (u32 LE), expiration as Unix seconds (u32 LE), operation count (u32 LE),
/// then each operation as tag byte + fields. Pure and repeatable.
pub fn signable_bytes(tx: &Transaction, chain_id: &ChainId) -> Vec<u8> {
    let mut buf = Vec::with_capacity(256);
    buf.extend_from_slice(chain_id.as_bytes());
    buf.extend_from_slice(&tx.ref_block_num.to_le_bytes());
    buf.extend_from_slice(&tx.ref_block_prefix.to_le_bytes());
    buf.extend_from_slice(&(tx.expiration.timestamp() as u32).to_le_bytes());
    buf.extend_from_slice(&(tx.operations().len() as u32).to_le_bytes());
    for op in tx.operations() {
        encode_operation(&mut buf, op);
    }
    buf
}

/// SHA-256 of [`signable_bytes`] — what actually goes to the signer.
pub fn signing_digest(tx: &Transaction, chain_id: &ChainId) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(signable_bytes(tx, chain_id));
    hasher.finalize().into()
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Signs and seals a transaction.
///
/// Computes the digest, asks `wallet` to sign it with the key identified
/// by `public_key_hint`, and attaches the result. On success the
/// transaction is sealed; on failure it is left untouched and open.
///
/// # Errors
///
/// - [`ProtocolError::SigningFailed`] from the wallet (locked, unknown
///   key) or when the wallet returns malformed signature bytes.
/// - [`ProtocolError::AlreadySealed`] if the transaction was sealed before
///   the call.
pub fn sign_transaction(
    tx: &mut Transaction,
    chain_id: &ChainId,
    wallet: &dyn WalletSigner,
    public_key_hint: &str,
) -> Result<(), ProtocolError> {
    if tx.is_sealed() {
        return Err(ProtocolError::AlreadySealed);
    }
    let digest = signing_digest(tx, chain_id);
    let signature = wallet.sign(&digest, public_key_hint)?;
    tx.attach_signature(hex::encode(signature), public_key_hint.to_string())?;
    tracing::debug!(public_key = public_key_hint, "transaction signed and sealed");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Asset;
    use crate::operation::{RecurrentTransferOperation, TransferOperation, VoteOperation};
    use crate::transaction::TransactionBuilder;
    use crate::wallet::SoftWallet;
    use chrono::{TimeZone, Utc};

    fn sample_tx() -> Transaction {
        TransactionBuilder::new()
            .reference_block(4660, 0xdead_beef)
            .expiration(Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap())
            .push_operation(Operation::Vote(VoteOperation {
                voter: "alice".into(),
                author: "bob".into(),
                permlink: "/".into(),
                weight: 11,
            }))
            .push_operation(Operation::Transfer(TransferOperation {
                from_account: "alice".into(),
                to_account: "bob".into(),
                amount: Asset::hive(1),
                memo: "hello from waggle!".into(),
            }))
            .build()
    }

    #[test]
    fn signable_bytes_are_repeatable() {
        let tx = sample_tx();
        let chain_id = ChainId::mainnet();
        assert_eq!(
            signable_bytes(&tx, &chain_id),
            signable_bytes(&tx, &chain_id),
            "same state must yield byte-identical output"
        );
        assert_eq!(
            signing_digest(&tx, &chain_id),
            signing_digest(&tx, &chain_id)
        );
    }

    #[test]
    fn digest_changes_with_the_chain_id() {
        let tx = sample_tx();
        let mainnet = ChainId::mainnet();
        let testnet = ChainId::from_hex(crate::config::TESTNET_CHAIN_ID).unwrap();
        assert_ne!(signing_digest(&tx, &mainnet), signing_digest(&tx, &testnet));
    }

    #[test]
    fn digest_changes_with_the_operations() {
        let chain_id = ChainId::mainnet();
        let base = sample_tx();
        let mut extended = sample_tx();
        extended
            .push_operation(Operation::Vote(VoteOperation {
                voter: "carol".into(),
                author: "bob".into(),
                permlink: "/".into(),
                weight: 1,
            }))
            .unwrap();
        assert_ne!(
            signing_digest(&base, &chain_id),
            signing_digest(&extended, &chain_id)
        );
    }

    #[test]
    fn digest_is_sensitive_to_operation_order() {
        let chain_id = ChainId::mainnet();
        let expiration = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let a = Operation::Vote(VoteOperation {
            voter: "a".into(),
            author: "x".into(),
            permlink: "/".into(),
            weight: 1,
        });
        let b = Operation::Vote(VoteOperation {
            voter: "b".into(),
            author: "x".into(),
            permlink: "/".into(),
            weight: 1,
        });

        let ab = TransactionBuilder::new()
            .expiration(expiration)
            .push_operation(a.clone())
            .push_operation(b.clone())
            .build();
        let ba = TransactionBuilder::new()
            .expiration(expiration)
            .push_operation(b)
            .push_operation(a)
            .build();

        assert_ne!(signing_digest(&ab, &chain_id), signing_digest(&ba, &chain_id));
    }

    #[test]
    fn sealing_does_not_change_the_digest() {
        let chain_id = ChainId::mainnet();
        let mut tx = sample_tx();
        let before = signing_digest(&tx, &chain_id);
        tx.attach_signature(hex::encode([3u8; 64]), "key".into())
            .unwrap();
        assert_eq!(before, signing_digest(&tx, &chain_id));
    }

    #[test]
    fn extensions_are_part_of_the_digest() {
        let chain_id = ChainId::mainnet();
        let expiration = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let build = |pair_ids: &[u32]| {
            TransactionBuilder::new()
                .expiration(expiration)
                .push_operation(Operation::RecurrentTransfer(RecurrentTransferOperation {
                    from_account: "alice".into(),
                    to_account: "harry".into(),
                    amount: Asset::hive(10),
                    memo: String::new(),
                    recurrence: 1,
                    executions: 3,
                    extensions: pair_ids
                        .iter()
                        .map(|&pair_id| {
                            RecurrentTransferExtension::RecurrentTransferPairId(
                                crate::operation::types::RecurrentTransferPairId { pair_id },
                            )
                        })
                        .collect(),
                }))
                .build()
        };

        assert_ne!(
            signing_digest(&build(&[]), &chain_id),
            signing_digest(&build(&[0]), &chain_id)
        );
        assert_ne!(
            signing_digest(&build(&[0]), &chain_id),
            signing_digest(&build(&[1]), &chain_id)
        );
    }

    #[test]
    fn sign_transaction_seals_with_the_hinted_key() {
        let mut wallet = SoftWallet::new();
        let public_key = wallet.generate();
        let mut tx = sample_tx();

        sign_transaction(&mut tx, &ChainId::mainnet(), &wallet, &public_key).unwrap();

        assert!(tx.is_sealed());
        let attached = tx.signature().unwrap();
        assert_eq!(attached.public_key, public_key);
        // Ed25519 signatures are 64 bytes = 128 hex chars.
        assert_eq!(attached.signature.len(), 128);
    }

    #[test]
    fn sign_transaction_with_unknown_key_fails_and_leaves_tx_open() {
        let wallet = SoftWallet::new();
        let mut tx = sample_tx();

        match sign_transaction(&mut tx, &ChainId::mainnet(), &wallet, "deadbeef") {
            Err(ProtocolError::SigningFailed { .. }) => {}
            other => panic!("expected SigningFailed, got {other:?}"),
        }
        assert!(!tx.is_sealed());
    }

    #[test]
    fn signing_twice_is_rejected() {
        let mut wallet = SoftWallet::new();
        let public_key = wallet.generate();
        let mut tx = sample_tx();

        sign_transaction(&mut tx, &ChainId::mainnet(), &wallet, &public_key).unwrap();
        match sign_transaction(&mut tx, &ChainId::mainnet(), &wallet, &public_key) {
            Err(ProtocolError::AlreadySealed) => {}
            other => panic!("expected AlreadySealed, got {other:?}"),
        }
    }
}
