use sha2::{Digest, Sha256};

/// Hex SHA-256 of the given bytes, as recorded in generation manifests.
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
