#![forbid(unsafe_code)]

//! Logical character counting over UTF-8 encoded bytes.
//!
//! Post budgets are expressed in code points, not bytes: a four-byte character
//! counts as one unit. The scanner walks the byte sequence, derives each code
//! point's encoded width from the high bits of its leading byte, and rejects any
//! sequence the standard decoder would reject (stray continuation bytes,
//! truncation, overlong forms, surrogates, values above U+10FFFF).

/// Rejection raised for an invalid encoded sequence. `offset` is the index of the
/// first byte of the offending sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("malformed text at byte {offset}: {reason}")]
pub struct MalformedText {
    pub offset: usize,
    pub reason: &'static str,
}

/// Number of code points in `bytes`.
pub fn char_length(bytes: &[u8]) -> Result<usize, MalformedText> {
    let mut count = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        let lead = bytes[i];
        let width = encoded_width(lead).ok_or(MalformedText {
            offset: i,
            reason: "invalid leading byte",
        })?;
        if width > 1 {
            if lead == 0xC0 || lead == 0xC1 {
                return Err(MalformedText {
                    offset: i,
                    reason: "overlong encoding",
                });
            }
            if lead > 0xF4 {
                return Err(MalformedText {
                    offset: i,
                    reason: "code point above U+10FFFF",
                });
            }
            if i + width > bytes.len() {
                return Err(MalformedText {
                    offset: i,
                    reason: "truncated sequence",
                });
            }
            let (lo, hi) = second_byte_range(lead);
            if !(lo..=hi).contains(&bytes[i + 1]) {
                return Err(MalformedText {
                    offset: i,
                    reason: "invalid continuation byte",
                });
            }
            if bytes[i + 2..i + width].iter().any(|b| !is_continuation(*b)) {
                return Err(MalformedText {
                    offset: i,
                    reason: "invalid continuation byte",
                });
            }
        }
        i += width;
        count += 1;
    }
    Ok(count)
}

fn encoded_width(lead: u8) -> Option<usize> {
    if lead >> 7 == 0 {
        Some(1)
    } else if lead >> 5 == 0b110 {
        Some(2)
    } else if lead >> 4 == 0b1110 {
        Some(3)
    } else if lead >> 3 == 0b1_1110 {
        Some(4)
    } else {
        None
    }
}

fn is_continuation(b: u8) -> bool {
    b >> 6 == 0b10
}

// Leads E0/F0 would otherwise admit overlongs, ED admits surrogates and F4 admits
// values past U+10FFFF; the second byte range closes each gap.
fn second_byte_range(lead: u8) -> (u8, u8) {
    match lead {
        0xE0 => (0xA0, 0xBF),
        0xED => (0x80, 0x9F),
        0xF0 => (0x90, 0xBF),
        0xF4 => (0x80, 0x8F),
        _ => (0x80, 0xBF),
    }
}
