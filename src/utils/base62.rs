//! Base62 codec used to derive aliases from store-assigned ids.
//!
//! The alphabet is `0-9A-Za-z` and each symbol's digit value is its position
//! in that string. Digits are written most-significant first, so `1` encodes
//! to `"1"`, `62` to `"10"` and longer aliases always belong to larger ids.

use crate::errors::AliasError;

const CHARSET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const BASE: i64 = 62;

/// Longest alias `encode` can produce (`i64::MAX` needs 11 digits).
pub const MAX_ALIAS_LEN: usize = 11;

/// Encodes a positive id as its base62 alias.
pub fn encode(id: i64) -> Result<String, AliasError> {
    if id <= 0 {
        return Err(AliasError::InvalidEncodingInput(id));
    }

    let mut buf = [0u8; MAX_ALIAS_LEN];
    let mut pos = buf.len();
    let mut num = id;

    while num > 0 {
        pos -= 1;
        buf[pos] = CHARSET[(num % BASE) as usize];
        num /= BASE;
    }

    // Every byte comes from CHARSET, which is ASCII.
    Ok(buf[pos..].iter().map(|&b| b as char).collect())
}

/// Decodes a canonical alias back to the id it was derived from.
///
/// Only strings `encode` can return are accepted: empty input, foreign
/// characters, leading zeros and values beyond `i64::MAX` are rejected.
pub fn decode(alias: &str) -> Result<i64, AliasError> {
    let malformed = || AliasError::MalformedAlias(alias.to_string());

    if alias.is_empty() || alias.len() > MAX_ALIAS_LEN || alias.starts_with('0') {
        return Err(malformed());
    }

    alias.bytes().try_fold(0i64, |acc, byte| {
        let digit = digit_value(byte).ok_or_else(malformed)?;
        acc.checked_mul(BASE)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(malformed)
    })
}

fn digit_value(byte: u8) -> Option<i64> {
    let value = match byte {
        b'0'..=b'9' => byte - b'0',
        b'A'..=b'Z' => byte - b'A' + 10,
        b'a'..=b'z' => byte - b'a' + 36,
        _ => return None,
    };
    Some(i64::from(value))
}
