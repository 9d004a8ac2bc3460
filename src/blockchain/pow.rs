// Proof of work: the nonce search behind block mining.
//
// A block hash is SHA-256 over the decimal timestamp, the transaction's textual
// form and the decimal nonce, concatenated. Mining looks for a nonce whose hash,
// rendered as hex, starts with `difficulty` '0' characters.

use log::debug;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::encoding::{self, HASH_HEX_SIZE};
use super::transaction::Transaction;
use super::Hash;

/// Errors that can occur while searching for a nonce
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MiningError {
    #[error("Difficulty {difficulty} exceeds the {max} hex characters of a hash")]
    DifficultyOutOfRange { difficulty: usize, max: usize },

    #[error("No nonce in 0..={max_nonce} satisfies difficulty {difficulty}")]
    NonceSpaceExhausted { difficulty: usize, max_nonce: u64 },
}

/// The fixed part of a block's hash input; only the nonce varies between attempts.
#[derive(Debug, Clone)]
pub(crate) struct HashInput {
    prefix: String,
}

impl HashInput {
    pub(crate) fn new(timestamp: i64, transaction: &Transaction) -> Self {
        HashInput {
            prefix: format!("{}{}", timestamp, transaction),
        }
    }

    pub(crate) fn digest(&self, nonce: u64) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.prefix.as_bytes());
        hasher.update(nonce.to_string().as_bytes());
        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest[..]);
        out
    }
}

/// Builds the hex prefix a mined hash must start with
pub fn target_prefix(difficulty: usize) -> String {
    "0".repeat(difficulty)
}

/// Checks whether `hash` satisfies `difficulty`
pub fn meets_difficulty(hash: &Hash, difficulty: usize) -> bool {
    difficulty <= HASH_HEX_SIZE && encoding::to_hex(hash).starts_with(&target_prefix(difficulty))
}

fn check_difficulty(difficulty: usize) -> Result<(), MiningError> {
    if difficulty > HASH_HEX_SIZE {
        return Err(MiningError::DifficultyOutOfRange {
            difficulty,
            max: HASH_HEX_SIZE,
        });
    }
    Ok(())
}

/// Finds the first nonce, counting up from 0, whose block hash satisfies `difficulty`
///
/// # Arguments
///
/// * `timestamp` - The block timestamp in milliseconds
/// * `transaction` - The transaction carried by the block
/// * `difficulty` - Number of leading hex zeros required
/// * `max_nonce` - Inclusive upper bound on the search; `None` searches the whole `u64` range
///
/// # Returns
///
/// The winning nonce, or an error when the bounded range holds none
pub fn find_nonce(
    timestamp: i64,
    transaction: &Transaction,
    difficulty: usize,
    max_nonce: Option<u64>,
) -> Result<u64, MiningError> {
    check_difficulty(difficulty)?;

    let input = HashInput::new(timestamp, transaction);
    let target = target_prefix(difficulty);
    let limit = max_nonce.unwrap_or(u64::MAX);

    debug!("Searching nonces 0..={} for prefix {:?}", limit, target);

    let mut nonce = 0u64;
    loop {
        if encoding::to_hex(&input.digest(nonce)).starts_with(&target) {
            return Ok(nonce);
        }
        if nonce == limit {
            return Err(MiningError::NonceSpaceExhausted {
                difficulty,
                max_nonce: limit,
            });
        }
        nonce += 1;
    }
}

/// Same contract as [`find_nonce`], but splits the range across rayon's thread pool.
///
/// Any satisfying nonce may win, not necessarily the smallest.
pub fn find_nonce_parallel(
    timestamp: i64,
    transaction: &Transaction,
    difficulty: usize,
    max_nonce: Option<u64>,
) -> Result<u64, MiningError> {
    check_difficulty(difficulty)?;

    let input = HashInput::new(timestamp, transaction);
    let target = target_prefix(difficulty);
    let limit = max_nonce.unwrap_or(u64::MAX);

    debug!(
        "Searching nonces 0..={} for prefix {:?} on {} threads",
        limit,
        target,
        rayon::current_num_threads()
    );

    (0..=limit)
        .into_par_iter()
        .find_any(|nonce| encoding::to_hex(&input.digest(*nonce)).starts_with(&target))
        .ok_or(MiningError::NonceSpaceExhausted {
            difficulty,
            max_nonce: limit,
        })
}
