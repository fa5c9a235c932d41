// Copyright (c) 2026 Waggle Contributors. MIT License.
// See LICENSE for details.

//! # Waggle CLI
//!
//! Entry point for the `waggle` binary. Parses arguments, initializes
//! logging, and runs one of the offline commands:
//!
//! - `inspect` — decode a transaction JSON file and print each operation
//!   through the visitor dispatcher
//! - `sign`    — assemble operations into a transaction and sign it with
//!   the configured WIF key
//! - `version` — print build version information
//!
//! Logs go to stderr; command output (decoded operations, signed
//! transaction JSON) goes to stdout.

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use std::io::Read;
use std::path::Path;

use waggle_protocol::chain::ChainId;
use waggle_protocol::operation::{
    accept, accept_strict, decode_operations, ClaimRewardBalanceOperation, CommentOperation,
    LimitOrderCancelOperation, Operation, OperationVisitor, RecurrentTransferOperation,
    TransferOperation, VisitOutcome, VoteOperation,
};
use waggle_protocol::transaction::{sign_transaction, signing_digest, TransactionBuilder};
use waggle_protocol::wallet::SoftWallet;

use cli::{Commands, InspectArgs, SignArgs, WaggleCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let args = WaggleCli::parse();
    logging::init_logging(
        "waggle=info,waggle_protocol=info",
        LogFormat::from_str_lossy(&args.log_format),
    );
    tracing::debug!(endpoint = %args.endpoint, "waggle starting");

    match args.command {
        Commands::Inspect(inspect) => run_inspect(inspect),
        Commands::Sign(sign) => run_sign(sign),
        Commands::Version => {
            println!("waggle {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

/// Renders each operation kind it knows about; used in lenient mode by
/// default so unknown-to-us-but-registered kinds are simply skipped.
struct Printer;

impl OperationVisitor for Printer {
    fn vote(&mut self, op: &VoteOperation) -> VisitOutcome {
        println!("vote: {} on @{}/{} (weight {})", op.voter, op.author, op.permlink, op.weight);
        VisitOutcome::Handled
    }

    fn comment(&mut self, op: &CommentOperation) -> VisitOutcome {
        println!(
            "comment: @{}/{} {:?} ({} bytes)",
            op.author,
            op.permlink,
            op.title,
            op.body.len()
        );
        VisitOutcome::Handled
    }

    fn transfer(&mut self, op: &TransferOperation) -> VisitOutcome {
        println!(
            "transfer: {} -> {} {} memo {:?}",
            op.from_account, op.to_account, op.amount, op.memo
        );
        VisitOutcome::Handled
    }

    fn recurrent_transfer(&mut self, op: &RecurrentTransferOperation) -> VisitOutcome {
        println!(
            "recurrent_transfer: {} -> {} {} every {}h x{} ({} extension(s))",
            op.from_account,
            op.to_account,
            op.amount,
            op.recurrence,
            op.executions,
            op.extensions.len()
        );
        VisitOutcome::Handled
    }

    fn limit_order_cancel(&mut self, op: &LimitOrderCancelOperation) -> VisitOutcome {
        println!("limit_order_cancel: {} order {}", op.owner, op.orderid);
        VisitOutcome::Handled
    }

    fn claim_reward_balance(&mut self, op: &ClaimRewardBalanceOperation) -> VisitOutcome {
        println!(
            "claim_reward_balance: {} claims {} + {} + {}",
            op.account, op.reward_hive, op.reward_hbd, op.reward_vests
        );
        VisitOutcome::Handled
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let operations = load_operations(&args.file)?;
    tracing::info!(count = operations.len(), "decoded operations");

    let mut printer = Printer;
    for (index, op) in operations.iter().enumerate() {
        if args.strict {
            accept_strict(&mut printer, op)
                .with_context(|| format!("operation {index} not handled"))?;
        } else {
            accept(&mut printer, op);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// sign
// ---------------------------------------------------------------------------

fn run_sign(args: SignArgs) -> Result<()> {
    // Fail fast on missing key material, naming the option.
    let Some(wif) = args.wif.as_deref().filter(|w| !w.is_empty()) else {
        bail!("no signing key configured: set WAGGLE_WIF or pass --wif");
    };

    let chain_id = match args.chain_id.as_deref() {
        Some(value) => ChainId::from_hex(value).context("invalid --chain-id / WAGGLE_CHAIN_ID")?,
        None => ChainId::mainnet(),
    };

    let expiration = match args.expiration.as_deref() {
        Some(value) => DateTime::parse_from_rfc3339(value)
            .context("invalid --expiration / WAGGLE_EXPIRATION (want RFC 3339)")?
            .with_timezone(&Utc),
        None => Utc::now() + Duration::seconds(60),
    };

    let operations = load_operations(&args.file)?;
    if operations.is_empty() {
        bail!("{} contains no operations", args.file.display());
    }

    let mut wallet = SoftWallet::new();
    let public_key = wallet
        .import_wif(wif)
        .context("could not import the configured WIF key")?;

    let mut builder = TransactionBuilder::new()
        .reference_block(args.ref_block_num, args.ref_block_prefix)
        .expiration(expiration);
    for op in operations {
        builder = builder.push_operation(op);
    }
    let mut tx = builder.build();

    sign_transaction(&mut tx, &chain_id, &wallet, &public_key)
        .context("signing failed")?;

    tracing::info!(
        account = args.account.as_deref().unwrap_or("<unset>"),
        wallet = %args.wallet,
        chain_id = %chain_id,
        digest = %hex::encode(signing_digest(&tx, &chain_id)),
        "transaction signed and sealed"
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&tx).context("could not serialize the transaction")?
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// input loading
// ---------------------------------------------------------------------------

/// Reads a JSON document that is either a bare array of operations or an
/// object with an `operations` array, and decodes it into typed
/// operations. `-` reads stdin.
fn load_operations(path: &Path) -> Result<Vec<Operation>> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("could not read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?
    };

    let document: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))?;

    let operations_value = match &document {
        serde_json::Value::Object(map) => map
            .get("operations")
            .with_context(|| format!("{} has no \"operations\" array", path.display()))?,
        other => other,
    };

    decode_operations(operations_value)
        .with_context(|| format!("could not decode operations from {}", path.display()))
}
