/// Polynomial rolling hash (`h = h * 31 + unit`) over UTF-16 code units.
///
/// Wraps at 32 bits and is stable forever for a given string. Not a security
/// primitive; collisions are expected.
pub fn hash_seed(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_hashes_to_zero() {
        assert_eq!(hash_seed(""), 0);
    }

    #[test]
    fn matches_known_values() {
        assert_eq!(hash_seed("a"), 97);
        assert_eq!(hash_seed("ab"), 97 * 31 + 98);
        // Same polynomial as Java's String::hashCode.
        assert_eq!(hash_seed("hello"), 99_162_322);
        assert_eq!(hash_seed("hello-world"), hash_seed("hello-world"));
    }

    #[test]
    fn order_matters() {
        assert_ne!(hash_seed("ab"), hash_seed("ba"));
    }

    #[test]
    fn wraps_instead_of_overflowing() {
        let long = "z".repeat(64);
        // Must not panic in debug builds.
        let _ = hash_seed(&long);
    }

    #[test]
    fn hashes_utf16_units_not_bytes() {
        // U+1F3B2 (game die) is a surrogate pair: 0xD83C 0xDFB2.
        let expected = 0xD83Ci32.wrapping_mul(31).wrapping_add(0xDFB2);
        assert_eq!(hash_seed("\u{1F3B2}"), expected);
    }
}
