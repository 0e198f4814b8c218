//! Display masking for stored API keys. Presentation only, not a security
//! boundary.

/// Mask shown when a secret is too short to reveal anything.
const SHORT_MASK: &str = "***";

/// A hyphenated vendor prefix is honored only within this many leading
/// characters.
const PREFIX_SCAN: usize = 12;

/// Mask an API key for display: `sk-1234567890abcdef` becomes `sk-...cdef`.
///
/// Secrets shorter than 8 characters collapse to `"***"`. A hyphen within
/// the first 12 characters marks the end of a vendor prefix (kept,
/// including the hyphen); otherwise the first 3 characters are used.
/// Counts characters, not bytes.
pub fn mask_api_key(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < 8 {
        return SHORT_MASK.to_string();
    }
    let prefix_len = chars
        .iter()
        .take(PREFIX_SCAN)
        .position(|&c| c == '-')
        .map(|i| i + 1)
        .unwrap_or(3);
    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphenated_prefix() {
        assert_eq!(mask_api_key("sk-1234567890abcdef"), "sk-...cdef");
        assert_eq!(mask_api_key("ghp-xxxxxxxxyyyy"), "ghp-...yyyy");
    }

    #[test]
    fn short_secret_is_constant_mask() {
        assert_eq!(mask_api_key("ab"), "***");
        assert_eq!(mask_api_key(""), "***");
        assert_eq!(mask_api_key("1234567"), "***");
    }

    #[test]
    fn no_hyphen_uses_first_three_chars() {
        assert_eq!(mask_api_key("abcdefghijkl"), "abc...ijkl");
    }

    #[test]
    fn late_hyphen_is_ignored() {
        // Hyphen at index 12 is outside the prefix scan
        assert_eq!(mask_api_key("abcdefghijkl-wxyz"), "abc...wxyz");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(mask_api_key("密钥-秘密秘密秘密密钥"), "密钥-...秘密密钥");
    }
}
