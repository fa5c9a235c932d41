//! The signer seam, plus a soft in-process wallet.
//!
//! Key custody is an external collaborator: the core only ever hands a
//! 32-byte digest to a [`WalletSigner`] and gets signature bytes back.
//! Production deployments put a real wallet service behind the trait;
//! [`SoftWallet`] is the in-process Ed25519 implementation used by the CLI
//! for offline signing and by the test suite.
//!
//! Secrets never implement `Serialize`, are never logged, and WIF input is
//! checksum-verified before a key is accepted. If you add logging to this
//! module, keep key material out of it.

use ed25519_dalek::{Signer, SigningKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;

use crate::config::{WIF_DECODED_LENGTH, WIF_VERSION_BYTE};
use crate::error::ProtocolError;

// ---------------------------------------------------------------------------
// WalletSigner
// ---------------------------------------------------------------------------

/// An external wallet/signing service, reduced to the one call the core
/// needs. Failures (locked wallet, unknown key, transport trouble) surface
/// as [`ProtocolError::SigningFailed`] and are retryable by the caller.
pub trait WalletSigner {
    /// Signs a 32-byte digest with the key identified by
    /// `public_key_hint` (hex-encoded public key).
    fn sign(&self, digest: &[u8; 32], public_key_hint: &str) -> Result<Vec<u8>, ProtocolError>;

    /// Hex-encoded public keys currently available for signing.
    fn public_keys(&self) -> Vec<String>;
}

// ---------------------------------------------------------------------------
// SoftWallet
// ---------------------------------------------------------------------------

struct SoftKey {
    signing_key: SigningKey,
    public_key_hex: String,
}

/// An in-memory Ed25519 wallet.
///
/// Holds any number of keys, addressed by their hex-encoded public key.
/// Accepts raw hex seeds and WIF-style base58check secrets (version byte
/// `0x80`, double-SHA-256 checksum).
#[derive(Default)]
pub struct SoftWallet {
    keys: Vec<SoftKey>,
}

impl SoftWallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh keypair from the OS RNG and returns its
    /// hex-encoded public key.
    pub fn generate(&mut self) -> String {
        let signing_key = SigningKey::generate(&mut OsRng);
        self.insert(signing_key)
    }

    /// Imports a 32-byte secret from a hex string. Returns the hex-encoded
    /// public key.
    pub fn import_secret_hex(&mut self, secret_hex: &str) -> Result<String, ProtocolError> {
        let bytes = hex::decode(secret_hex).map_err(|e| ProtocolError::SigningFailed {
            reason: format!("secret is not valid hex: {e}"),
        })?;
        let seed: [u8; SECRET_KEY_LENGTH] =
            bytes
                .try_into()
                .map_err(|b: Vec<u8>| ProtocolError::SigningFailed {
                    reason: format!("secret must be {SECRET_KEY_LENGTH} bytes, got {}", b.len()),
                })?;
        Ok(self.insert(SigningKey::from_bytes(&seed)))
    }

    /// Imports a WIF-encoded secret. Returns the hex-encoded public key.
    ///
    /// WIF is base58check: a `0x80` version byte, the 32-byte secret, and
    /// a 4-byte double-SHA-256 checksum. Anything that does not verify is
    /// rejected before a key is constructed.
    pub fn import_wif(&mut self, wif: &str) -> Result<String, ProtocolError> {
        let decoded = bs58::decode(wif)
            .into_vec()
            .map_err(|e| ProtocolError::SigningFailed {
                reason: format!("WIF is not valid base58: {e}"),
            })?;

        if decoded.len() != WIF_DECODED_LENGTH {
            return Err(ProtocolError::SigningFailed {
                reason: format!(
                    "WIF decodes to {} bytes, expected {WIF_DECODED_LENGTH}",
                    decoded.len()
                ),
            });
        }
        if decoded[0] != WIF_VERSION_BYTE {
            return Err(ProtocolError::SigningFailed {
                reason: format!("WIF version byte is {:#04x}, expected {WIF_VERSION_BYTE:#04x}", decoded[0]),
            });
        }

        let (payload, checksum) = decoded.split_at(WIF_DECODED_LENGTH - 4);
        if wif_checksum(payload) != checksum {
            return Err(ProtocolError::SigningFailed {
                reason: "WIF checksum mismatch".to_string(),
            });
        }

        let mut seed = [0u8; SECRET_KEY_LENGTH];
        seed.copy_from_slice(&payload[1..]);
        Ok(self.insert(SigningKey::from_bytes(&seed)))
    }

    fn insert(&mut self, signing_key: SigningKey) -> String {
        let public_key_hex = hex::encode(signing_key.verifying_key().to_bytes());
        if let Some(existing) = self
            .keys
            .iter_mut()
            .find(|k| k.public_key_hex == public_key_hex)
        {
            existing.signing_key = signing_key;
        } else {
            self.keys.push(SoftKey {
                signing_key,
                public_key_hex: public_key_hex.clone(),
            });
        }
        public_key_hex
    }
}

impl WalletSigner for SoftWallet {
    fn sign(&self, digest: &[u8; 32], public_key_hint: &str) -> Result<Vec<u8>, ProtocolError> {
        let key = self
            .keys
            .iter()
            .find(|k| k.public_key_hex == public_key_hint)
            .ok_or_else(|| ProtocolError::SigningFailed {
                reason: format!("no key for public key {public_key_hint}"),
            })?;
        Ok(key.signing_key.sign(digest).to_bytes().to_vec())
    }

    fn public_keys(&self) -> Vec<String> {
        self.keys.iter().map(|k| k.public_key_hex.clone()).collect()
    }
}

/// First four bytes of `sha256(sha256(payload))`.
fn wif_checksum(payload: &[u8]) -> [u8; 4] {
    use sha2::{Digest, Sha256};
    let first = Sha256::digest(payload);
    let second = Sha256::digest(first);
    let mut out = [0u8; 4];
    out.copy_from_slice(&second[..4]);
    out
}

/// Encodes a 32-byte secret as WIF. Primarily for key tooling and tests;
/// the inverse of [`SoftWallet::import_wif`].
pub fn encode_wif(secret: &[u8; SECRET_KEY_LENGTH]) -> String {
    let mut payload = Vec::with_capacity(WIF_DECODED_LENGTH);
    payload.push(WIF_VERSION_BYTE);
    payload.extend_from_slice(secret);
    let checksum = wif_checksum(&payload);
    payload.extend_from_slice(&checksum);
    bs58::encode(payload).into_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
