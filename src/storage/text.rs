use core::fmt;

use heapless::String;

/// Owned text with a fixed maximum length in bytes
///
/// Input longer than `N` bytes is truncated silently at the last char
/// boundary that fits; it never overflows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundedText<const N: usize>(String<N>);

impl<const N: usize> BoundedText<N> {
    /// Build from a string, truncating to capacity
    pub fn new(value: &str) -> Self {
        let mut text = String::new();
        for ch in value.chars() {
            if text.push(ch).is_err() {
                break;
            }
        }
        Self(text)
    }

    /// Decode a NUL-padded byte field
    ///
    /// Stops at the first NUL and keeps the longest valid UTF-8 prefix.
    pub fn from_padded(bytes: &[u8]) -> Self {
        let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let bytes = &bytes[..len];
        let text = match core::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => core::str::from_utf8(&bytes[..err.valid_up_to()]).unwrap_or_default(),
        };
        Self::new(text)
    }

    /// Encode into a NUL-padded byte field of `M` bytes
    ///
    /// The last byte is always NUL when `M > N`.
    pub fn to_padded<const M: usize>(&self) -> [u8; M] {
        let mut field = [0u8; M];
        let bytes = self.0.as_bytes();
        let len = bytes.len().min(M);
        field[..len].copy_from_slice(&bytes[..len]);
        field
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> PartialEq<str> for BoundedText<N> {
    fn eq(&self, other: &str) -> bool {
        self.0.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for BoundedText<N> {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_str() == *other
    }
}

impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::BoundedText;

    #[test]
    fn truncates_on_char_boundary() {
        let text = BoundedText::<4>::new("abcdef");
        assert_eq!(text, "abcd");

        // 'é' is two bytes and does not fit after three ASCII bytes
        let text = BoundedText::<4>::new("abcé");
        assert_eq!(text, "abc");
    }

    #[test]
    fn padded_round_trip_stops_at_nul() {
        let field: [u8; 8] = BoundedText::<7>::new("wave").to_padded();
        assert_eq!(&field, b"wave\0\0\0\0");
        assert_eq!(BoundedText::<7>::from_padded(&field), "wave");
    }

    #[test]
    fn invalid_utf8_keeps_valid_prefix() {
        let field = [b'o', b'k', 0xFF, b'x', 0];
        assert_eq!(BoundedText::<8>::from_padded(&field), "ok");
    }
}
