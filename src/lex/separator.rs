//! The separator oracle.
//!
//! Decides whether two adjacent lexemes may be written back-to-back or
//! whether at least one space must sit between them. Only bounded windows
//! matter: the last two bytes of the left lexeme and the first two bytes of
//! the right one.

use super::token::PUNCTUATORS;
use super::Token;

/// Whether writing `a` directly followed by `b` would change the token
/// stream on re-lexing. Empty operands never need a separator.
pub fn needs_separator(a: &str, b: &str) -> bool {
    let (ab, bb) = (a.as_bytes(), b.as_bytes());
    let (Some(&ca), Some(&cb)) = (ab.last(), bb.first()) else {
        return false;
    };

    // Identifier or number continuation.
    if is_word(ca) && is_word(cb) {
        return true;
    }

    // The boundary would open or close a comment.
    if (ca == b'/' && cb == b'/') || (ca == b'/' && cb == b'*') || (ca == b'*' && cb == b'/') {
        return true;
    }

    // The boundary would form a multi-character punctuator or an ellipsis.
    if ab.len() >= 2 && is_merged_punct(&[ab[ab.len() - 2], ca, cb]) {
        return true;
    }
    if is_merged_punct(&[ca, cb]) {
        return true;
    }
    if bb.len() >= 2 && is_merged_punct(&[ca, cb, bb[1]]) {
        return true;
    }

    // A quote or digit followed by a word character reads as a
    // user-defined literal suffix.
    if (ca == b'"' || ca == b'\'' || ca.is_ascii_digit())
        && (cb.is_ascii_alphabetic() || cb == b'_')
    {
        return true;
    }

    // Dot next to a digit reads as a floating-point literal.
    if (ca == b'.' && cb.is_ascii_digit()) || (ca.is_ascii_digit() && cb == b'.') {
        return true;
    }

    false
}

/// Join tokens, inserting a single space only where the oracle demands one.
pub fn join_min_sep(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev: Option<&str> = None;
    for tok in tokens {
        if let Some(p) = prev {
            if needs_separator(p, tok) {
                out.push(' ');
            }
        }
        out.push_str(tok);
        prev = Some(tok);
    }
    out
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_merged_punct(window: &[u8]) -> bool {
    window == b"..." || PUNCTUATORS.iter().any(|p| p.as_bytes() == window)
}
