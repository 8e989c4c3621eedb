//! Base-62 short code codec.
//!
//! The alphabet is the fixed 62-symbol sequence lowercase, uppercase,
//! digits — indexed 0 through 61. Encoding emits remainder digits in
//! generation order (least-significant first) and does **not** reverse
//! them, so `encode(62)` is `"ab"`, not `"ba"`. Decoding treats the
//! characters as remainders in the same order, which makes the pair an
//! exact inverse.

/// Ordered symbol set used for short codes.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const BASE: u64 = 62;

/// Encodes a numeric id as a short code.
///
/// Digits are emitted least-significant first and left unreversed.
/// `encode(0)` produces an empty string; callers that need a non-empty
/// code must start numbering at 1.
pub fn encode(mut n: u64) -> String {
    let mut code = String::new();
    while n > 0 {
        code.push(ALPHABET[(n % BASE) as usize] as char);
        n /= BASE;
    }
    code
}

/// Decodes a short code back to its numeric id.
///
/// Characters are interpreted as remainders in emission order, i.e.
/// the value is `Σ index(cᵢ) · 62^i`. Returns `None` if the code
/// contains a character outside the alphabet or the value overflows
/// `u64`. The empty string decodes to 0.
pub fn decode(code: &str) -> Option<u64> {
    let mut value: u64 = 0;
    let mut place: u64 = 1;
    for (i, c) in code.bytes().enumerate() {
        let idx = ALPHABET.iter().position(|&a| a == c)? as u64;
        if i > 0 {
            place = place.checked_mul(BASE)?;
        }
        value = value.checked_add(idx.checked_mul(place)?)?;
    }
    Some(value)
}
