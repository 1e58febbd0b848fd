//! Comment removal that leaves literals intact.
//!
//! `//` comments drop up to (but not including) their newline; `/* */`
//! comments vanish entirely. String, character, and raw-string literals are
//! copied through untouched, so comment markers inside them survive.
//! Newlines inside `"..."` and `'...'` do not terminate the literal.

use super::token::{scan_prefixed_raw, skip_quoted};

/// Strip `//` and `/* */` comments from source text.
///
/// Idempotent: stripping already-stripped text is a no-op.
pub fn strip_comments(code: &str) -> String {
    let b = code.as_bytes();
    let n = b.len();
    let mut out = String::with_capacity(n);
    let mut keep_from = 0;
    let mut i = 0;

    while i < n {
        match b[i] {
            b'/' if b.get(i + 1) == Some(&b'*') => {
                out.push_str(&code[keep_from..i]);
                i += 2;
                while i < n && !(b[i] == b'*' && b.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                i = (i + 2).min(n);
                keep_from = i;
            }
            b'/' if b.get(i + 1) == Some(&b'/') => {
                out.push_str(&code[keep_from..i]);
                i += 2;
                while i < n && b[i] != b'\n' {
                    i += 1;
                }
                // The newline itself is kept.
                keep_from = i;
            }
            b'"' => {
                i = skip_quoted(b, i + 1, b'"');
            }
            b'\'' => {
                i = skip_quoted(b, i + 1, b'\'');
            }
            _ => {
                if let Some(end) = scan_prefixed_raw(b, i) {
                    i = end;
                } else {
                    i += 1;
                }
            }
        }
    }

    out.push_str(&code[keep_from..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_comment_keeps_newline() {
        assert_eq!(strip_comments("a // c\nb"), "a \nb");
    }

    #[test]
    fn test_strip_block_comment() {
        assert_eq!(strip_comments("a/*x*/b"), "ab");
        assert_eq!(strip_comments("a/* multi\nline */b"), "ab");
    }

    #[test]
    fn test_strip_unterminated_block_comment() {
        assert_eq!(strip_comments("a/* open"), "a");
    }

    #[test]
    fn test_strip_preserves_string_contents() {
        assert_eq!(strip_comments(r#"s = "// not" + t;"#), r#"s = "// not" + t;"#);
        assert_eq!(strip_comments(r#""/* keep */""#), r#""/* keep */""#);
    }

    #[test]
    fn test_strip_preserves_char_and_escapes() {
        assert_eq!(strip_comments(r"'\'' // x"), r"'\'' ");
        assert_eq!(strip_comments(r#""a\"b // c""#), r#""a\"b // c""#);
    }

    #[test]
    fn test_strip_preserves_raw_string() {
        let code = r#"auto s = R"(a /* b */ // c)"; // tail"#;
        assert_eq!(strip_comments(code), r#"auto s = R"(a /* b */ // c)"; "#);
    }

    #[test]
    fn test_strip_preserves_prefixed_raw_string() {
        let code = r#"u8R"x(// still here)x" /*gone*/"#;
        assert_eq!(strip_comments(code), r#"u8R"x(// still here)x" "#);
    }

    #[test]
    fn test_strip_newline_inside_string_does_not_terminate() {
        let code = "\"ab\ncd // kept\" // dropped";
        assert_eq!(strip_comments(code), "\"ab\ncd // kept\" ");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let code = "int a; /* c */ b(); // d\nR\"(e /* f */)\"";
        let once = strip_comments(code);
        assert_eq!(strip_comments(&once), once);
    }
}
