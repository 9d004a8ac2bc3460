/// Marker rendered in place of a hash that does not exist
pub const NULL_MARKER: &str = "NULL";

/// Number of hex characters in a rendered SHA-256 digest
pub const HASH_HEX_SIZE: usize = 64;

/// Renders bytes as lowercase, zero-padded hex
///
/// Every byte yields two characters, so a difficulty of `d` counts `d` leading zero nibbles.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Renders an optional hash, using the "NULL" marker when absent
pub fn to_hex_or_null(bytes: Option<&[u8]>) -> String {
    match bytes {
        Some(bytes) => to_hex(bytes),
        None => NULL_MARKER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex_pads_each_byte() {
        assert_eq!(to_hex(&[0x00, 0x0a, 0xff]), "000aff");
        assert_eq!(to_hex(&[]), "");
        assert_eq!(to_hex(&[0u8; 32]).len(), HASH_HEX_SIZE);
    }

    #[test]
    fn test_absent_hash_renders_marker() {
        assert_eq!(to_hex_or_null(None), "NULL");
        assert_eq!(to_hex_or_null(Some(&[0xde, 0xad])), "dead");
        // An empty digest input is not the same as no hash
        assert_eq!(to_hex_or_null(Some(&[])), "");
    }
}
