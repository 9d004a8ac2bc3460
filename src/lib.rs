//! A minimal proof-of-work ledger.
//!
//! Each block carries one transaction and links to its predecessor by hash.
//! Blocks are mined by searching for a nonce whose SHA-256 hash, in hex,
//! starts with a configured number of '0' characters.

pub mod blockchain;
pub mod config;

pub use blockchain::{Block, Blockchain, BlockchainError, Hash, MiningError, Transaction};
pub use config::{ChainConfig, ConfigError};
