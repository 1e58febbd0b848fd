//! Minimal C/C++ tokenizer.
//!
//! Splits comment-free source into a flat sequence of lexemes: string,
//! character, and raw-string literals (with their encoding prefixes),
//! identifiers, permissive numeric literals, multi-character punctuators,
//! and single characters. Whitespace is skipped. The lexemes are opaque to
//! the rest of the pipeline; re-tokenizing their concatenation (with
//! separators where [`super::needs_separator`] demands one) reproduces the
//! same sequence.

/// A single lexeme. Nonempty; identity is its position in the stream.
pub type Token = String;

/// Multi-character punctuators, longest first so a prefix never shadows a
/// longer operator.
pub(crate) const PUNCTUATORS: &[&str] = &[
    ">>=", "<<=", "->*", "::", "->", "++", "--", "<<", ">>", "&&", "||", "==", "!=", "<=", ">=",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "##",
];

/// Longest raw-string delimiter accepted between `R"` and `(`.
const MAX_RAW_DELIM: usize = 16;

/// Whitespace as the C locale sees it.
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Skip a quoted literal body starting just past the opening quote.
///
/// A backslash always escapes the next byte; newlines do not terminate the
/// literal. Returns the offset just past the closing quote, or the end of
/// input for an unterminated literal.
pub(crate) fn skip_quoted(b: &[u8], mut i: usize, quote: u8) -> usize {
    while i < b.len() {
        let c = b[i];
        i += 1;
        if c == b'\\' {
            i = (i + 1).min(b.len());
        } else if c == quote {
            break;
        }
    }
    i
}

/// Scan a raw string literal whose `R` sits at `r`. Returns the offset just
/// past the closing quote, the end of input when unterminated, or `None`
/// when no raw string starts here (bad delimiter, no `(`).
pub(crate) fn scan_raw_string(b: &[u8], r: usize) -> Option<usize> {
    if !(b.get(r) == Some(&b'R') && b.get(r + 1) == Some(&b'"')) {
        return None;
    }
    let delim_start = r + 2;
    let mut k = delim_start;
    while k < b.len() && b[k] != b'(' {
        let d = b[k];
        if d == b')' || d == b'\\' || is_space(d) || k - delim_start >= MAX_RAW_DELIM {
            return None;
        }
        k += 1;
    }
    if k >= b.len() {
        return None;
    }
    let delim = &b[delim_start..k];

    // Body ends at the first `)delim"`.
    let mut pos = k + 1;
    while pos < b.len() {
        if b[pos] == b')'
            && b.len() > pos + 1 + delim.len()
            && &b[pos + 1..pos + 1 + delim.len()] == delim
            && b[pos + 1 + delim.len()] == b'"'
        {
            return Some(pos + 2 + delim.len());
        }
        pos += 1;
    }
    Some(b.len())
}

/// Scan a raw string with an optional `u8`/`u`/`U`/`L` encoding prefix
/// starting at `i`. Returns the offset just past the literal.
pub(crate) fn scan_prefixed_raw(b: &[u8], i: usize) -> Option<usize> {
    let rest = &b[i..];
    let offset = if rest.starts_with(b"u8R\"") {
        2
    } else if rest.starts_with(b"uR\"") || rest.starts_with(b"UR\"") || rest.starts_with(b"LR\"") {
        1
    } else if rest.starts_with(b"R\"") {
        0
    } else {
        return None;
    };
    scan_raw_string(b, i + offset)
}

/// Scan a `"..."` literal with an optional `u8`/`u`/`U`/`L` prefix.
fn scan_string(b: &[u8], i: usize) -> Option<usize> {
    let rest = &b[i..];
    let offset = if rest.starts_with(b"u8\"") {
        2
    } else if rest.starts_with(b"u\"") || rest.starts_with(b"U\"") || rest.starts_with(b"L\"") {
        1
    } else if rest.first() == Some(&b'"') {
        0
    } else {
        return None;
    };
    Some(skip_quoted(b, i + offset + 1, b'"'))
}

/// Scan a `'...'` literal with an optional `u`/`U`/`L` prefix.
fn scan_char(b: &[u8], i: usize) -> Option<usize> {
    let rest = &b[i..];
    let offset = if rest.starts_with(b"u'") || rest.starts_with(b"U'") || rest.starts_with(b"L'") {
        1
    } else if rest.first() == Some(&b'\'') {
        0
    } else {
        return None;
    };
    Some(skip_quoted(b, i + offset + 1, b'\''))
}

/// Tokenize comment-free source into lexemes.
pub fn tokenize(code: &str) -> Vec<Token> {
    let b = code.as_bytes();
    let n = b.len();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < n {
        let c = b[i];

        if is_space(c) {
            i += 1;
            continue;
        }

        // Literals first: raw strings, then plain strings, then chars.
        if let Some(end) = scan_prefixed_raw(b, i) {
            tokens.push(code[i..end].to_string());
            i = end;
            continue;
        }
        if let Some(end) = scan_string(b, i) {
            tokens.push(code[i..end].to_string());
            i = end;
            continue;
        }
        if let Some(end) = scan_char(b, i) {
            tokens.push(code[i..end].to_string());
            i = end;
            continue;
        }

        if is_ident_start(c) {
            let start = i;
            i += 1;
            while i < n && is_ident_char(b[i]) {
                i += 1;
            }
            tokens.push(code[start..i].to_string());
            continue;
        }

        // Permissive number: a digit pulls in any alnum, dot, underscore,
        // or digit-separator quote that follows.
        if c.is_ascii_digit() {
            let start = i;
            i += 1;
            while i < n
                && (b[i].is_ascii_alphanumeric() || matches!(b[i], b'.' | b'_' | b'\''))
            {
                i += 1;
            }
            tokens.push(code[start..i].to_string());
            continue;
        }

        if let Some(p) = PUNCTUATORS
            .iter()
            .find(|p| b[i..].starts_with(p.as_bytes()))
        {
            tokens.push((*p).to_string());
            i += p.len();
            continue;
        }

        // Anything else is a one-character token. Multi-byte characters are
        // kept whole so slicing stays on UTF-8 boundaries.
        let len = code[i..].chars().next().map_or(1, |ch| ch.len_utf8());
        tokens.push(code[i..i + len].to_string());
        i += len;
    }

    tokens
}
