// Blockchain module
//
// This module contains the core ledger implementation:
// - Transaction structure
// - Block structure and its hash
// - Proof of work search
// - Blockchain structure (pending queue, balances, validity)
// - Hex rendering and the JSON dump

pub mod block;
pub mod chain;
pub mod encoding;
pub mod export;
pub mod pow;
pub mod transaction;

/// A SHA-256 digest
pub type Hash = [u8; 32];

// Re-export main components for easier access
pub use block::Block;
pub use chain::{Blockchain, BlockchainError};
pub use pow::MiningError;
pub use transaction::Transaction;
