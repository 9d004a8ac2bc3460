use anyhow::Context;
use log::{info, warn};

use pow_ledger::{Blockchain, ChainConfig, Transaction};

use std::io::{self, Write};

// Build the chain from the environment configuration
fn initialize_blockchain() -> anyhow::Result<Blockchain> {
    let config = ChainConfig::from_env().context("failed to read chain configuration")?;

    info!(
        "Creating blockchain with difficulty {} (max nonce {:?}, parallel {})",
        config.difficulty, config.max_nonce, config.parallel
    );

    Ok(Blockchain::with_config(config)?)
}

// Submit the sample transfers in order
fn submit_transactions(blockchain: &mut Blockchain) {
    blockchain.add_transaction(Transaction::new("A", "B", 100));
    blockchain.add_transaction(Transaction::new("A", "B", 100));
    blockchain.add_transaction(Transaction::new("B", "A", 50));
    blockchain.add_transaction(Transaction::new("A", "C", 10));
}

fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let mut blockchain = initialize_blockchain()?;
    submit_transactions(&mut blockchain);

    while blockchain.has_pending_transaction() {
        blockchain
            .mine_pending_transaction()
            .context("failed to mine pending transaction")?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    blockchain.write_json(&mut out)?;
    writeln!(out)?;

    if blockchain.is_chain_valid() {
        info!("Blockchain is valid");
    } else {
        warn!("Blockchain is NOT valid");
    }

    for address in ["A", "B", "C"] {
        info!("Balance of {}: {}", address, blockchain.get_balance(address)?);
    }

    Ok(())
}
