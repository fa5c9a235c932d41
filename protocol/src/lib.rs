// Copyright (c) 2026 Waggle Contributors. MIT License.
// See LICENSE for details.

//! # Waggle Protocol — Core Library
//!
//! The client-side heart of Waggle: a typed operation-dispatch and
//! transaction-assembly layer for Hive-style Graphene chains. Everything a
//! wallet, bot, or indexer needs to turn loose JSON into strongly-typed
//! operations, bundle them into a transaction, and hand the canonical bytes
//! to a signer — without this crate ever touching the network or a private
//! key it didn't explicitly receive.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the actual concerns of a
//! chain client:
//!
//! - **operation** — The closed operation set: registry, decoder, visitor.
//! - **transaction** — Ordered assembly, canonical signing bytes, sealing.
//! - **asset** — NAI-tagged exact amounts. No floating point near money.
//! - **chain** — The RPC seam: chain metadata, broadcast, account rewards.
//! - **wallet** — The signer seam, plus a soft Ed25519 wallet for tests
//!   and offline signing.
//! - **rewards** — Reward-balance claiming built on top of the above.
//! - **config** — Chain identifiers and protocol constants.
//! - **error** — One error enum, one stable kind per failure mode.
//!
//! ## Design Philosophy
//!
//! 1. Decoding is pure: same JSON in, same `Operation` out, every time.
//! 2. A transaction is mutable until signed and sealed forever after.
//! 3. Network and key custody live behind traits. This crate computes.
//! 4. Every monetary magnitude stays an exact integer string end to end.

pub mod asset;
pub mod chain;
pub mod config;
pub mod error;
pub mod operation;
pub mod rewards;
pub mod transaction;
pub mod wallet;
