//! # CLI Interface
//!
//! Defines the command-line argument structure for the `waggle` binary
//! using `clap` derive. Every configuration option can come from the
//! environment (`WAGGLE_*` variables) or a flag; required ones are
//! validated eagerly so a misconfigured invocation fails with a named
//! option instead of a mid-flight surprise.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Waggle command-line client.
///
/// Decodes, assembles, and signs transactions for Hive-style chains.
/// Network access is out of scope for this binary: `inspect` and `sign`
/// are fully offline, and broadcast is left to the node tooling of your
/// choice.
#[derive(Parser, Debug)]
#[command(
    name = "waggle",
    about = "Waggle chain client: decode, assemble, and sign transactions",
    version,
    propagate_version = true
)]
pub struct WaggleCli {
    /// Node endpoint this client is configured against. Recorded in
    /// diagnostics; no network calls are made by the offline commands.
    #[arg(
        long,
        env = "WAGGLE_ENDPOINT",
        default_value = "https://api.hive.blog",
        global = true
    )]
    pub endpoint: String,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "WAGGLE_LOG_FORMAT", default_value = "pretty", global = true)]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the waggle binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a transaction JSON file and print each operation through
    /// the visitor dispatcher.
    Inspect(InspectArgs),
    /// Assemble operations from a JSON file into a transaction and sign
    /// it with the configured key.
    Sign(SignArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to a JSON file: either `{"operations": [...]}` or a bare
    /// array of single-key tagged operation maps. `-` reads stdin.
    pub file: PathBuf,

    /// Fail on operations this tool has no dedicated rendering for,
    /// instead of skipping them.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `sign` subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Path to the operations JSON file (same shapes as `inspect`).
    /// `-` reads stdin.
    pub file: PathBuf,

    /// Hex-encoded chain id to sign against. Defaults to mainnet.
    #[arg(long, env = "WAGGLE_CHAIN_ID")]
    pub chain_id: Option<String>,

    /// Low 16 bits of the reference block number (TaPoS). Defaults to 0,
    /// which anchors to the genesis block.
    #[arg(long, env = "WAGGLE_REF_BLOCK_NUM", default_value_t = 0)]
    pub ref_block_num: u16,

    /// Bytes 4..8 of the reference block id, as an integer. Defaults to 0.
    #[arg(long, env = "WAGGLE_REF_BLOCK_PREFIX", default_value_t = 0)]
    pub ref_block_prefix: u32,

    /// Expiration as RFC 3339 (e.g. 2026-08-23T12:01:00Z). Defaults to
    /// one minute from now.
    #[arg(long, env = "WAGGLE_EXPIRATION")]
    pub expiration: Option<String>,

    /// WIF-encoded signing key. Required; kept out of `--help` examples
    /// on purpose — prefer the environment variable over a flag that
    /// lands in shell history.
    #[arg(long, env = "WAGGLE_WIF", hide_env_values = true)]
    pub wif: Option<String>,

    /// Account this key belongs to. Informational, echoed in logs.
    #[arg(long, env = "WAGGLE_ACCOUNT")]
    pub account: Option<String>,

    /// Wallet name, for parity with wallet-service deployments where the
    /// key lives behind a named wallet. Unused by the soft signer.
    #[arg(long, env = "WAGGLE_WALLET", default_value = "default")]
    pub wallet: String,

    /// Wallet unlock password, for wallet-service deployments. Unused by
    /// the soft signer and never logged.
    #[arg(long, env = "WAGGLE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        WaggleCli::command().debug_assert();
    }

    #[test]
    fn sign_parses_reference_block_flags() {
        let cli = WaggleCli::parse_from([
            "waggle",
            "sign",
            "ops.json",
            "--ref-block-num",
            "4660",
            "--ref-block-prefix",
            "305419896",
        ]);
        match cli.command {
            Commands::Sign(args) => {
                assert_eq!(args.ref_block_num, 4660);
                assert_eq!(args.ref_block_prefix, 305_419_896);
                assert_eq!(args.wallet, "default");
            }
            other => panic!("expected sign, got {other:?}"),
        }
    }
}
