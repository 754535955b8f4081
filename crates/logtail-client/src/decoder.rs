//! Streaming UTF-8 decoding of binary frames.
//!
//! The server cuts frames at byte boundaries, so a multi-byte character can
//! straddle two frames. The decoder holds back an incomplete trailing sequence
//! until the next frame completes it.

/// Longest possible incomplete UTF-8 sequence
const MAX_CARRY: usize = 3;

#[derive(Debug, Default)]
pub struct Utf8Decoder {
    carry: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a frame. Invalid sequences become U+FFFD.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let mut input = std::mem::take(&mut self.carry);
        input.extend_from_slice(bytes);

        let mut out = String::with_capacity(input.len());
        let mut rest = input.as_slice();

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    // prefix already validated
                    out.push_str(std::str::from_utf8(valid).unwrap_or_default());

                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            debug_assert!(after.len() <= MAX_CARRY);
                            self.carry = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Bytes held back for the next frame
    pub fn pending(&self) -> &[u8] {
        &self.carry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ascii() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"hello\n"), "hello\n");
        assert!(decoder.pending().is_empty());
    }

    #[test]
    fn test_split_multibyte_character() {
        let bytes = "grüße €".as_bytes();
        for split in 0..=bytes.len() {
            let mut decoder = Utf8Decoder::new();
            let mut text = decoder.decode(&bytes[..split]);
            text.push_str(&decoder.decode(&bytes[split..]));
            assert_eq!(text, "grüße €", "split at {split}");
        }
    }

    #[test]
    fn test_carry_is_held_back() {
        let mut decoder = Utf8Decoder::new();
        let euro = "€".as_bytes();
        assert_eq!(decoder.decode(&euro[..2]), "");
        assert_eq!(decoder.pending(), &euro[..2]);
        assert_eq!(decoder.decode(&euro[2..]), "€");
    }

    #[test]
    fn test_invalid_bytes_are_replaced() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"a\xffb"), "a\u{FFFD}b");
    }
}
