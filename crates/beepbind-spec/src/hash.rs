//! Source provenance hashing.
//!
//! Conversion is deterministic, so the BLAKE3 hash of the source export is
//! enough to tie a generated binding back to the file it came from. Reports
//! surface this hash; the generated text never embeds it.

/// Computes the BLAKE3 hash of source file content.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
///
/// # Example
/// ```
/// use beepbind_spec::hash::source_hash;
///
/// let hash = source_hash(b"{\"ticksPerBeat\": 8, \"channels\": []}");
/// assert_eq!(hash.len(), 64);
/// ```
pub fn source_hash(content: &[u8]) -> String {
    blake3::hash(content).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hash_is_stable() {
        let a = source_hash(b"{}");
        let b = source_hash(b"{}");
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_is_content_sensitive() {
        assert_ne!(source_hash(b"{}"), source_hash(b"{ }"));
    }
}
