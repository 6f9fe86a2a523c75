//! Base62 codec for short codes.
//!
//! Maps non-negative integers to compact alphanumeric strings and back.
//! The first alphabet symbol (`'0'`) stands for zero and only appears alone,
//! so every value has exactly one encoding.

/// Symbol table; a symbol's value is its index.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = 62;

/// Errors returned by [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Base62Error {
    #[error("Base62 input is empty")]
    Empty,

    #[error("Invalid Base62 character {0:?} at position {1}")]
    InvalidCharacter(char, usize),

    #[error("Base62 input has a leading zero")]
    LeadingZero,

    #[error("Base62 value does not fit into 64 bits")]
    Overflow,
}

/// Encodes `n` as a Base62 string, most-significant digit first.
///
/// `encode(0)` is `"0"`.
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut digits = Vec::with_capacity(11);
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Decodes a canonical Base62 string.
///
/// # Errors
///
/// Rejects empty input, characters outside [`ALPHABET`], non-canonical
/// leading zeros and values above `u64::MAX`.
pub fn decode(s: &str) -> Result<u64, Base62Error> {
    if s.is_empty() {
        return Err(Base62Error::Empty);
    }

    if s.len() > 1 && s.starts_with(ALPHABET[0] as char) {
        return Err(Base62Error::LeadingZero);
    }

    s.chars().enumerate().try_fold(0u64, |acc, (pos, c)| {
        let digit = symbol_value(c).ok_or(Base62Error::InvalidCharacter(c, pos))?;
        acc.checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or(Base62Error::Overflow)
    })
}

fn symbol_value(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(c as u64 - '0' as u64),
        'a'..='z' => Some(c as u64 - 'a' as u64 + 10),
        'A'..='Z' => Some(c as u64 - 'A' as u64 + 36),
        _ => None,
    }
}

/// Returns true if every character of `s` belongs to the Base62 alphabet.
pub fn is_base62(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}
