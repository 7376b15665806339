//! Address Validation
//!
//! Shape checks for base58 Solana addresses, and extraction of a candidate
//! address from free-form chat text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum plausible address length
pub const MIN_ADDRESS_LEN: usize = 32;

/// Maximum plausible address length
pub const MAX_ADDRESS_LEN: usize = 44;

static ADDRESS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // Literal pattern, cannot fail to compile
    Regex::new(r"\b[1-9A-HJ-NP-Za-km-z]{32,44}\b").expect("static address pattern")
});

/// Check whether a string looks like a base58 Solana address.
///
/// Length must be 32-44 and every character in the base58 alphabet
/// (digits 1-9, letters excluding `0`, `O`, `I`, `l`). The address
/// checksum is NOT verified: a shape-valid string with a bad checksum is
/// accepted here and simply fails at the fetch stage. Known gap, kept
/// deliberately.
pub fn is_valid_address(candidate: &str) -> bool {
    (MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&candidate.len())
        && candidate.chars().all(is_base58_char)
}

fn is_base58_char(c: char) -> bool {
    matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z')
}

/// Extract the first address-shaped run from free text.
///
/// Falls back to the whole trimmed input when no run is found but the
/// input itself has a plausible length; the caller validates the result.
pub fn extract_address(text: &str) -> Option<String> {
    if let Some(m) = ADDRESS_PATTERN.find(text) {
        return Some(m.as_str().to_string());
    }

    let trimmed = text.trim();
    if (MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&trimmed.len()) {
        return Some(trimmed.to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "7pQHLgaTrP25TjmSaoGvTJJKeS2ZyGT2xAAvYLHsSXtk";

    #[test]
    fn test_valid_address() {
        assert_eq!(EXAMPLE.len(), 44);
        assert!(is_valid_address(EXAMPLE));
        // 32 chars is the lower bound
        assert!(is_valid_address("So11111111111111111111111111111111"));
    }

    #[test]
    fn test_length_bounds() {
        assert!(!is_valid_address("7pQHLgaTrP25TjmSaoG1")); // 20 chars
        assert!(!is_valid_address(&"1".repeat(31)));
        assert!(!is_valid_address(&"1".repeat(45)));
        assert!(is_valid_address(&"1".repeat(32)));
        assert!(is_valid_address(&"1".repeat(44)));
    }

    #[test]
    fn test_rejects_non_base58() {
        // '0', 'O', 'I', 'l' are excluded from the alphabet
        let with_zero = format!("0{}", &EXAMPLE[1..]);
        assert_eq!(with_zero.len(), 44);
        assert!(!is_valid_address(&with_zero));
        assert!(!is_valid_address(&format!("O{}", &EXAMPLE[1..])));
        assert!(!is_valid_address(&format!("l{}", &EXAMPLE[1..])));
    }

    #[test]
    fn test_extract_from_free_text() {
        let text = format!("please analyze {EXAMPLE} for me");
        assert_eq!(extract_address(&text).as_deref(), Some(EXAMPLE));
    }

    #[test]
    fn test_extract_falls_back_to_whole_input() {
        // Contains a '0', so the regex finds no run, but the trimmed input
        // has a plausible length; validation then rejects it.
        let candidate = format!("0{}", &EXAMPLE[1..8]).repeat(5);
        let extracted = extract_address(&format!("  {} ", &candidate[..40]));
        assert!(extracted.is_some());
    }

    #[test]
    fn test_extract_none_for_chat() {
        assert!(extract_address("hello, what can you do?").is_none());
    }
}
