//! Stable string hash.
//!
//! The classic djb2-xor variant: seed 5381, then `hash = hash * 33 ^ unit` for
//! every UTF-16 code unit of the input, with 32-bit wrapping arithmetic.
//! Hashing UTF-16 units (not bytes or chars) keeps the output identical to a
//! browser computing the same function over `charCodeAt`, so server-rendered
//! and client-rendered layouts agree.

/// Initial hash state.
pub const SEED: u32 = 5381;

/// Hash a string to a `u32`. Pure and platform independent.
///
/// ```
/// assert_eq!(zengallery::stable_hash(""), 5381);
/// assert_eq!(zengallery::stable_hash("a"), 177604);
/// ```
pub fn stable_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(SEED, |hash, unit| hash.wrapping_mul(33) ^ u32::from(unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_seed() {
        assert_eq!(stable_hash(""), SEED);
    }

    #[test]
    fn known_values() {
        assert_eq!(stable_hash("a"), 177604);
        assert_eq!(stable_hash("b"), 177607);
        assert_eq!(stable_hash("hello"), 178056679);
        assert_eq!(stable_hash("gallery/001.jpg"), 911918784);
    }

    #[test]
    fn hashes_utf16_units() {
        // U+00E9 is a single unit; U+1F600 is a surrogate pair.
        assert_eq!(stable_hash("é"), 177484);
        assert_eq!(stable_hash("😀"), 5308056);
    }

    #[test]
    fn order_sensitive() {
        assert_ne!(stable_hash("ab"), stable_hash("ba"));
    }
}
