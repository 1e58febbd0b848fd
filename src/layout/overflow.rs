//! Greedy packing for rows below the image.
//!
//! Once the target grid is exhausted there is nothing left to match, so
//! remaining tokens are packed densely: single spaces only where the
//! separator oracle demands one, new rows when the next token would run
//! past the row's effective width. Each row draws its own effective width
//! from `[width, width + SHOOT)` so the ragged right edge varies.

use rand::Rng;

use crate::lex::{needs_separator, Token};

use super::SHOOT;

/// Append overflow rows for `tokens` to `out`. Every row ends in a
/// newline; an empty row accepts one token no matter how long it is.
pub(super) fn pack_rows<R: Rng>(out: &mut String, tokens: &[Token], width: usize, rng: &mut R) {
    let mut col = 0;
    let mut w_eff = width + rng.random_range(0..SHOOT);
    let mut prev: Option<&Token> = None;

    for token in tokens {
        let sep = usize::from(prev.is_some_and(|p| needs_separator(p, token)));
        if col > 0 && col + sep + token.len() > w_eff {
            out.push('\n');
            col = 0;
            w_eff = width + rng.random_range(0..SHOOT);
        } else if col > 0 && sep == 1 {
            out.push(' ');
            col += 1;
        }
        out.push_str(token);
        col += token.len();
        prev = Some(token);
    }

    if col > 0 {
        out.push('\n');
    }
}
