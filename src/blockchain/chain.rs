use log::{debug, info, warn};
use thiserror::Error;

use std::collections::VecDeque;
use std::io::Write;

use crate::config::{ChainConfig, ConfigError};

use super::block::Block;
use super::encoding;
use super::export;
use super::pow::MiningError;
use super::transaction::Transaction;

/// Errors that can occur during blockchain operations
#[derive(Debug, Error)]
pub enum BlockchainError {
    #[error("Invalid operation: no pending transaction to mine")]
    EmptyQueue,

    #[error("Invalid operation: malformed address {0:?}")]
    InvalidAddress(String),

    #[error("Balance of {0:?} does not fit in a 64-bit integer")]
    BalanceOverflow(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Mining error: {0}")]
    MiningError(#[from] MiningError),

    #[error("Export error: {0}")]
    ExportError(#[from] serde_json::Error),
}

/// Represents the blockchain
#[derive(Debug, Clone)]
pub struct Blockchain {
    /// The chain of blocks; index 0 is always the genesis block
    blocks: Vec<Block>,

    /// Transactions waiting to be mined, oldest at the front
    pending_transactions: VecDeque<Transaction>,

    /// Mining parameters, fixed at creation
    config: ChainConfig,
}

impl Blockchain {
    /// Creates a new blockchain with a genesis block
    ///
    /// # Arguments
    ///
    /// * `difficulty` - Number of leading hex zeros every mined block needs
    ///
    /// # Returns
    ///
    /// A new Blockchain instance
    pub fn new(difficulty: usize) -> Result<Self, BlockchainError> {
        Self::with_config(ChainConfig::new(difficulty))
    }

    /// Creates a new blockchain with a genesis block and explicit mining parameters
    pub fn with_config(config: ChainConfig) -> Result<Self, BlockchainError> {
        config.validate()?;

        let mut blockchain = Blockchain {
            blocks: Vec::new(),
            pending_transactions: VecDeque::new(),
            config,
        };
        blockchain.create_genesis_block();

        Ok(blockchain)
    }

    /// Creates the genesis block; it is never mined
    fn create_genesis_block(&mut self) {
        let genesis_block = Block::new(Transaction::genesis());
        debug!(
            "Created genesis block with hash {}",
            encoding::to_hex(genesis_block.hash())
        );
        self.blocks.push(genesis_block);
    }

    /// Gets the last block in the chain
    pub fn latest_block(&self) -> &Block {
        // The genesis block is pushed at construction and blocks are never removed.
        &self.blocks[self.blocks.len() - 1]
    }

    /// Adds a new transaction to the back of the pending queue
    pub fn add_transaction(&mut self, transaction: Transaction) {
        debug!("Queued {}", transaction);
        self.pending_transactions.push_back(transaction);
    }

    pub fn has_pending_transaction(&self) -> bool {
        !self.pending_transactions.is_empty()
    }

    /// Mines the oldest pending transaction into a new block
    ///
    /// # Returns
    ///
    /// Result with the newly appended block. When mining fails the transaction stays queued.
    pub fn mine_pending_transaction(&mut self) -> Result<&Block, BlockchainError> {
        let transaction = self
            .pending_transactions
            .front()
            .cloned()
            .ok_or(BlockchainError::EmptyQueue)?;

        let mut block = Block::new(transaction);
        block.set_prev_hash(*self.latest_block().hash());
        block.mine_with(
            self.config.difficulty,
            self.config.max_nonce,
            self.config.parallel,
        )?;

        self.pending_transactions.pop_front();
        self.blocks.push(block);

        info!(
            "Appended block {} ({} pending)",
            self.blocks.len() - 1,
            self.pending_transactions.len()
        );

        Ok(self.latest_block())
    }

    /// Mines pending transactions until the queue drains
    ///
    /// # Returns
    ///
    /// Result with the number of blocks mined
    pub fn mine_all_pending(&mut self) -> Result<usize, BlockchainError> {
        let mut mined = 0;
        while self.has_pending_transaction() {
            self.mine_pending_transaction()?;
            mined += 1;
        }
        Ok(mined)
    }

    /// Gets the balance of an address from every transaction in the chain
    ///
    /// # Arguments
    ///
    /// * `address` - The identifier to total up
    ///
    /// # Returns
    ///
    /// Incoming amounts minus outgoing amounts; 0 for an address never seen
    pub fn get_balance(&self, address: &str) -> Result<i64, BlockchainError> {
        if address.trim().is_empty() {
            return Err(BlockchainError::InvalidAddress(address.to_string()));
        }

        self.blocks
            .iter()
            .try_fold(0i64, |balance, block| {
                block
                    .transaction()
                    .balance_delta(address)
                    .and_then(|delta| balance.checked_add(delta))
            })
            .ok_or_else(|| BlockchainError::BalanceOverflow(address.to_string()))
    }

    /// Validates the blockchain
    ///
    /// # Returns
    ///
    /// true if every block still matches its hash and links to its predecessor
    pub fn is_chain_valid(&self) -> bool {
        if !self.blocks[0].verify_hash() {
            warn!("Genesis block hash does not match its contents");
            return false;
        }

        for (i, pair) in self.blocks.windows(2).enumerate() {
            let (previous_block, current_block) = (&pair[0], &pair[1]);

            if !current_block.verify_hash() {
                warn!("Block {} hash does not match its contents", i + 1);
                return false;
            }

            if current_block.prev_hash() != Some(previous_block.hash()) {
                warn!("Block {} is not linked to block {}", i + 1, i);
                return false;
            }
        }

        true
    }

    /// Writes a JSON dump of the chain to `writer`
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), BlockchainError> {
        export::write_chain(&self.blocks, writer)?;
        Ok(())
    }

    /// Renders the chain as a JSON string
    pub fn to_json_string(&self) -> Result<String, BlockchainError> {
        let mut out = Vec::new();
        self.write_json(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: the genesis block is present from construction
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Read-only view of the pending queue, oldest first
    pub fn pending_transactions(&self) -> &VecDeque<Transaction> {
        &self.pending_transactions
    }

    /// The transaction the next mining step will consume
    pub fn peek_pending(&self) -> Option<&Transaction> {
        self.pending_transactions.front()
    }

    pub fn difficulty(&self) -> usize {
        self.config.difficulty
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }
}
