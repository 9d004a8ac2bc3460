use serde::Serialize;

use std::io::Write;

use super::block::Block;
use super::encoding;
use super::transaction::Transaction;

/// Read-only JSON view of a chain
#[derive(Debug, Serialize)]
pub struct ChainDump<'a> {
    pub chain: Vec<BlockDump<'a>>,
}

/// Read-only JSON view of a block; field order is part of the dump format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDump<'a> {
    pub timestamp: i64,
    pub transaction: &'a Transaction,
    pub hash: String,
    pub prev_hash: String,
    pub nonce: u64,
}

impl<'a> From<&'a Block> for BlockDump<'a> {
    fn from(block: &'a Block) -> Self {
        BlockDump {
            timestamp: block.timestamp(),
            transaction: block.transaction(),
            hash: encoding::to_hex(block.hash()),
            prev_hash: encoding::to_hex_or_null(block.prev_hash().map(|h| &h[..])),
            nonce: block.nonce(),
        }
    }
}

impl<'a> ChainDump<'a> {
    pub fn new(blocks: &'a [Block]) -> Self {
        ChainDump {
            chain: blocks.iter().map(BlockDump::from).collect(),
        }
    }
}

/// Writes a pretty-printed dump of `blocks` to `writer`
pub fn write_chain<W: Write>(blocks: &[Block], writer: W) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(writer, &ChainDump::new(blocks))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_field_order_and_null_marker() {
        let genesis = Block::with_timestamp(Transaction::genesis(), 1);
        let mut next = Block::with_timestamp(Transaction::new("A", "B", 100), 2);
        next.set_prev_hash(*genesis.hash());
        let blocks = vec![genesis, next];

        let mut out = Vec::new();
        write_chain(&blocks, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let fields = [
            "\"timestamp\"",
            "\"transaction\"",
            "\"hash\"",
            "\"prevHash\"",
            "\"nonce\"",
        ];
        let positions: Vec<usize> = fields
            .iter()
            .map(|field| text.find(field).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let chain = value["chain"].as_array().unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0]["prevHash"], "NULL");
        assert_eq!(chain[0]["transaction"]["from"], serde_json::Value::Null);
        assert_eq!(chain[1]["prevHash"], chain[0]["hash"]);
        assert_eq!(chain[1]["transaction"]["amount"], 100);
        assert_eq!(chain[1]["nonce"], 0);
    }
}
