//! Deterministic string digests for URL and content deduplication
//!
//! The dedup stores key on MD5 digests. No cryptographic property is
//! required here; any stable 128-bit hash would do.

/// Returns the lowercase hex MD5 digest of the input
///
/// # Examples
///
/// ```
/// use kumo::digest::digest;
///
/// assert_eq!(digest(""), "d41d8cd98f00b204e9800998ecf8427e");
/// assert_eq!(digest("abc"), "900150983cd24fb0d6963f7d28e17f72");
/// ```
pub fn digest(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        assert_eq!(digest("https://example.com/a"), digest("https://example.com/a"));
    }

    #[test]
    fn test_digest_differs_per_input() {
        assert_ne!(digest("https://example.com/a"), digest("https://example.com/b"));
    }

    #[test]
    fn test_digest_known_value() {
        // RFC 1321 test vector
        assert_eq!(digest("abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_digest_length() {
        assert_eq!(digest("anything").len(), 32);
    }
}
