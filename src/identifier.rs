//! Stable, content-derived identifiers.
//!
//! Identifiers are short hexadecimal strings derived from an arbitrary input
//! string (usually an absolute path). They are used as cross-session keys in the
//! persisted library state, so the hashing and the textual form must never
//! change: the same input always renders the same identifier, on every run and
//! on every platform.
//!
//! The hash keeps two interleaved 32-bit running values over the UTF-16 code
//! units of the input (even positions feed the first, odd positions the second)
//! and combines them with wrapping arithmetic. It is not cryptographic.

const SEED: i32 = (5381 << 16) + 5381;
const MIX: i32 = 1_566_083_941;

/// Compute the raw 32-bit identifier value of a string.
pub fn identifier_value(value: &str) -> i32 {
    let units: Vec<u16> = value.encode_utf16().collect();
    let mut hash1 = SEED;
    let mut hash2 = SEED;

    for pair in units.chunks(2) {
        hash1 = ((hash1 << 5).wrapping_add(hash1)) ^ i32::from(pair[0]);
        if let Some(&odd) = pair.get(1) {
            hash2 = ((hash2 << 5).wrapping_add(hash2)) ^ i32::from(odd);
        }
    }

    hash1.wrapping_add(hash2.wrapping_mul(MIX))
}

/// Render a raw identifier value in its persisted textual form.
///
/// Lowercase hexadecimal of the two's-complement bit pattern, no leading zeros.
pub fn render(value: i32) -> String {
    format!("{:x}", value as u32)
}

/// Derive the identifier of a string.
///
/// # Example
/// ```
/// use media_scope::identifier::identifier_of;
///
/// assert_eq!(identifier_of("test"), identifier_of("test"));
/// assert_ne!(identifier_of("test1"), identifier_of("test2"));
/// ```
pub fn identifier_of(value: &str) -> String {
    render(identifier_value(value))
}

/// Derive the key of an item in a presentation tree from its chain of labels.
///
/// The key is the wrapping sum of every label's identifier value, so it depends
/// on which labels are in the chain but not on their order.
pub fn tree_key<'a, I>(labels: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let sum = labels
        .into_iter()
        .fold(0i32, |acc, label| acc.wrapping_add(identifier_value(label)));
    render(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_is_deterministic() {
        for value in ["", " ", "123", "test", "/music/a.mp3"] {
            assert_eq!(identifier_of(value), identifier_of(value));
        }
    }

    #[test]
    fn test_identifier_distinguishes_inputs() {
        let pairs = [
            ("", " "),
            (" ", "  "),
            ("test1", "test2"),
            ("1", "2"),
            ("abcdefg", "0123456"),
        ];
        for (a, b) in pairs {
            assert_ne!(identifier_of(a), identifier_of(b), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_identifier_known_values() {
        // These values are persisted in existing library files
        assert_eq!(identifier_of(""), "2d2816fe");
        assert_eq!(identifier_of(" "), "cdcab77e");
        assert_eq!(identifier_of("test"), "9a907386");
        assert_eq!(identifier_of("abc"), "ece432aa");
        assert_eq!(identifier_of("/music/a.mp3"), "249f352a");
    }

    #[test]
    fn test_identifier_hashes_utf16_units() {
        assert_eq!(identifier_of("é"), "cdcab745");
    }

    #[test]
    fn test_render_has_no_sign_or_padding() {
        assert_eq!(render(-1), "ffffffff");
        assert_eq!(render(0x0f), "f");
        assert_eq!(render(0), "0");
    }

    #[test]
    fn test_tree_key_ignores_label_order() {
        assert_eq!(
            tree_key(["Scopes", "music", "rock"]),
            tree_key(["rock", "music", "Scopes"])
        );
        assert_ne!(tree_key(["Scopes", "music"]), tree_key(["Scopes", "video"]));
        assert_eq!(tree_key(std::iter::empty()), "0");
    }
}
