use chrono::Utc;
use log::info;

use std::fmt;
use std::time::Instant;

use super::encoding;
use super::pow::{self, HashInput, MiningError};
use super::transaction::Transaction;
use super::Hash;

/// Represents a block in the blockchain
#[derive(Debug, Clone)]
pub struct Block {
    /// Timestamp when the block was created, in milliseconds since the epoch
    pub(super) timestamp: i64,

    /// The transaction carried by this block
    pub(super) transaction: Transaction,

    /// Proof of work counter
    pub(super) nonce: u64,

    /// Hash of the previous block; `None` only for the genesis block
    pub(super) prev_hash: Option<Hash>,

    /// Hash of this block, kept in sync with `(timestamp, transaction, nonce)`
    pub(super) hash: Hash,
}

impl Block {
    /// Creates a new, unlinked and unmined block
    ///
    /// # Arguments
    ///
    /// * `transaction` - The transaction to wrap
    ///
    /// # Returns
    ///
    /// A new Block instance with nonce 0 and its initial hash computed
    pub fn new(transaction: Transaction) -> Self {
        Self::with_timestamp(transaction, Utc::now().timestamp_millis())
    }

    /// Creates a block with an explicit timestamp
    pub fn with_timestamp(transaction: Transaction, timestamp: i64) -> Self {
        let mut block = Block {
            timestamp,
            transaction,
            nonce: 0,
            prev_hash: None,
            hash: [0u8; 32],
        };
        block.hash = block.compute_hash();
        block
    }

    /// Calculates the hash of the block
    ///
    /// # Returns
    ///
    /// SHA-256 of the decimal timestamp, the transaction text and the decimal nonce
    pub fn compute_hash(&self) -> Hash {
        HashInput::new(self.timestamp, &self.transaction).digest(self.nonce)
    }

    /// Mines the block, searching without an upper bound on the nonce
    ///
    /// Only a difficulty above 64 hex characters can fail; the block is left unchanged then.
    pub fn mine(&mut self, difficulty: usize) -> Result<(), MiningError> {
        self.mine_with(difficulty, None, false)
    }

    /// Mines the block with an optional nonce cutoff and optional parallel search
    ///
    /// # Arguments
    ///
    /// * `difficulty` - Number of leading hex zeros required
    /// * `max_nonce` - Inclusive upper bound on the nonce
    /// * `parallel` - Split the search across threads
    ///
    /// # Returns
    ///
    /// Ok once nonce and hash hold the winning values; on error the block is unchanged
    pub fn mine_with(
        &mut self,
        difficulty: usize,
        max_nonce: Option<u64>,
        parallel: bool,
    ) -> Result<(), MiningError> {
        let started = Instant::now();

        let nonce = if parallel {
            pow::find_nonce_parallel(self.timestamp, &self.transaction, difficulty, max_nonce)?
        } else {
            pow::find_nonce(self.timestamp, &self.transaction, difficulty, max_nonce)?
        };

        self.nonce = nonce;
        self.hash = self.compute_hash();

        info!(
            "Mined block with nonce {} and hash {} in {} ms",
            self.nonce,
            encoding::to_hex(&self.hash),
            started.elapsed().as_millis()
        );

        Ok(())
    }

    /// Links this block to its predecessor; must happen before mining
    pub fn set_prev_hash(&mut self, prev_hash: Hash) {
        self.prev_hash = Some(prev_hash);
    }

    /// Checks that the stored hash still matches the block's contents
    pub fn verify_hash(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Checks whether the stored hash satisfies `difficulty`
    pub fn is_mined(&self, difficulty: usize) -> bool {
        pow::meets_difficulty(&self.hash, difficulty)
    }

    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    pub fn prev_hash(&self) -> Option<&Hash> {
        self.prev_hash.as_ref()
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block [timestamp={}, hash={}, transaction={}, prevHash={}, nonce={}]",
            self.timestamp,
            encoding::to_hex(&self.hash),
            self.transaction,
            encoding::to_hex_or_null(self.prev_hash.as_ref().map(|h| &h[..])),
            self.nonce
        )
    }
}
