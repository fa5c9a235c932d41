//! # Protocol Configuration & Constants
//!
//! Every magic number in Waggle lives here. Chain identifiers, asset NAIs,
//! and serialization limits are consensus-visible on the chains we talk to,
//! so they are spelled out once and referenced everywhere else.

use chrono::Duration;

// ---------------------------------------------------------------------------
// Chain Identifiers
// ---------------------------------------------------------------------------

/// Mainnet chain id, hex-encoded. Mixed into every signing digest so a
/// signature produced for one network can never be replayed on another.
pub const MAINNET_CHAIN_ID: &str =
    "beeab0de00000000000000000000000000000000000000000000000000000000";

/// Testnet chain id, hex-encoded.
pub const TESTNET_CHAIN_ID: &str =
    "18dcf0a285365fc58b71f18b3d3fec954aa0c141c44e4e5cb4cf777b9eab274e";

/// Chain ids are 256-bit values: 32 bytes, 64 hex characters.
pub const CHAIN_ID_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Asset NAIs
// ---------------------------------------------------------------------------

/// Numeric asset identifier for the liquid core token (HIVE).
pub const HIVE_NAI: &str = "@@000000021";

/// NAI for the chain's dollar-pegged stable token (HBD).
pub const HBD_NAI: &str = "@@000000013";

/// NAI for vesting shares (VESTS).
pub const VESTS_NAI: &str = "@@000000037";

/// Display precision of HIVE and HBD: 3 decimal places.
pub const HIVE_PRECISION: u8 = 3;

/// Display precision of VESTS: 6 decimal places.
pub const VESTS_PRECISION: u8 = 6;

/// Upper bound on asset precision accepted from the wire. Nothing on any
/// supported chain exceeds 12 decimal places.
pub const MAX_ASSET_PRECISION: u8 = 12;

// ---------------------------------------------------------------------------
// Transaction Parameters
// ---------------------------------------------------------------------------

/// How long a freshly assembled transaction stays valid, measured from the
/// head block time. One minute matches the reference wallet behavior: long
/// enough to sign and broadcast, short enough to bound replay exposure.
pub fn default_transaction_lifetime() -> Duration {
    Duration::seconds(60)
}

/// Ed25519 signatures are 64 bytes. A sealed transaction carrying anything
/// else is malformed.
pub const SIGNATURE_LENGTH: usize = 64;

/// WIF secrets are base58check: 1 version byte + 32 key bytes + 4 checksum
/// bytes.
pub const WIF_VERSION_BYTE: u8 = 0x80;
pub const WIF_DECODED_LENGTH: usize = 37;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_ids_are_64_hex_chars() {
        for id in [MAINNET_CHAIN_ID, TESTNET_CHAIN_ID] {
            assert_eq!(id.len(), CHAIN_ID_LENGTH * 2);
            assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn nais_follow_the_at_at_format() {
        for nai in [HIVE_NAI, HBD_NAI, VESTS_NAI] {
            assert!(nai.starts_with("@@"));
            assert_eq!(nai.len(), 11);
        }
    }
}
