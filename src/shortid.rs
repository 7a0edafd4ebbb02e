//! Base-62 short-identifier generator
//!
//! Encodes a counter value into a short alphanumeric string. The alphabet
//! ordering and the digit order of the output are part of the public
//! short-URL surface: changing either would change the character sequence
//! of every identifier issued by a live system.

/// Fixed 62-character alphabet: digits, then lowercase, then uppercase
///
/// Index 0 maps to '0', index 61 to 'Z'. This ordering is stable.
pub const ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Encodes a counter value as a base-62 string
///
/// Repeatedly takes the value modulo 62, appends the alphabet character,
/// then integer-divides by 62 until the value reaches zero. Digits are
/// produced least-significant-first and are deliberately not reversed;
/// identifiers issued under this ordering are already in circulation.
///
/// A `count` of 0 produces an empty string. Callers must never pass 0;
/// the allocator's counter starts at 1.
pub fn generate_short_id(count: u64) -> String {
    let mut c = count;
    let mut short_id = String::new();
    while c > 0 {
        short_id.push(ALPHABET[(c % 62) as usize] as char);
        c /= 62;
    }
    short_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn zero_yields_empty_string() {
        assert_eq!(generate_short_id(0), "");
    }

    #[test]
    fn single_digit_values() {
        assert_eq!(generate_short_id(1), "1");
        assert_eq!(generate_short_id(9), "9");
        assert_eq!(generate_short_id(10), "a");
        assert_eq!(generate_short_id(35), "z");
        assert_eq!(generate_short_id(36), "A");
        assert_eq!(generate_short_id(61), "Z");
    }

    #[test]
    fn digits_are_least_significant_first() {
        // 62 = 0*62^0 + 1*62^1, emitted low digit first
        assert_eq!(generate_short_id(62), "01");
        assert_eq!(generate_short_id(63), "11");
        // 3844 = 62^2
        assert_eq!(generate_short_id(3844), "001");
        assert_eq!(generate_short_id(3845), "101");
    }

    #[test]
    fn deterministic() {
        for n in 1..1000 {
            assert_eq!(generate_short_id(n), generate_short_id(n));
        }
    }

    #[test]
    fn injective_over_used_range() {
        let mut seen = HashSet::new();
        for n in 1..100_000u64 {
            assert!(seen.insert(generate_short_id(n)), "collision at {}", n);
        }
    }

    #[test]
    fn output_is_alphanumeric_and_non_empty() {
        for n in 1..10_000u64 {
            let id = generate_short_id(n);
            assert!(!id.is_empty());
            assert!(id.bytes().all(|b| b.is_ascii_alphanumeric()));
        }
    }
}
