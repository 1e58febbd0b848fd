//! Per-row dynamic program.
//!
//! A row is a sequence of segments: single spaces, synthesized `/* */`
//! comments, and tokens. The DP state is (column reached, tokens consumed,
//! kind of the last segment); the score counts cells whose foreground or
//! background classification matches the target row. The tables live in
//! flat buffers sized `(width + SHOOT)^2 * 4` and are reused between rows.

use rand::Rng;

use crate::art::{ArtGrid, DensityMap};
use crate::lex::{needs_separator, Token};

use super::{MAX_COMMENT_LEN, MIN_ROW_TOKENS, SHOOT};

/// Shortest synthesized comment: `/**/`.
const MIN_COMMENT_LEN: usize = 4;

/// Last-segment kinds.
const K_SPACE: usize = 0;
const K_COMMENT: usize = 1;
/// A token that must be kept apart from the token after it.
const K_TOKEN_SEP: usize = 2;
/// A token free to touch the token after it.
const K_TOKEN_FREE: usize = 3;
const KINDS: usize = 4;

const NO_SCORE: i32 = i32::MIN;
const NO_BACK: u32 = u32::MAX;

/// Everything a single row solve needs to read.
pub(super) struct RowContext<'a> {
    /// Tokens not yet emitted, starting with the next one to place.
    pub tokens: &'a [Token],
    pub grid: &'a ArtGrid,
    pub map: &'a DensityMap,
    pub row: usize,
}

impl RowContext<'_> {
    /// Whether the target wants foreground at this column. Columns past
    /// the grid's right edge read as background.
    fn wanted(&self, col: usize) -> bool {
        self.grid.get(self.row, col)
    }

    /// Score for a single space at `col`.
    fn space_gain(&self, col: usize) -> i32 {
        i32::from(!self.wanted(col))
    }

    /// Score for a token placed with its first byte at `col`.
    fn token_gain(&self, col: usize, token: &str) -> i32 {
        token
            .bytes()
            .enumerate()
            .map(|(off, b)| i32::from(self.map.is_foreground(b) == self.wanted(col + off)))
            .sum()
    }

    /// Score for a comment of length `len` starting at `col`. Interior
    /// cells always match (they are chosen per cell); only the four
    /// delimiter characters can miss.
    fn comment_gain(&self, col: usize, len: usize) -> i32 {
        let delims = [col, col + 1, col + len - 2, col + len - 1];
        (len as i32 - 4) + delims.iter().filter(|&&c| self.wanted(c)).count() as i32
    }
}

/// One solved row.
pub(super) struct SolvedRow {
    /// Row text, newline not included.
    pub text: String,
    /// How many tokens the row consumed.
    pub consumed: usize,
}

/// A row segment, reconstructed from back-pointers.
enum Segment {
    Space,
    Comment { col: usize, len: usize },
    Token(usize),
}

/// The DP and back-pointer tables for one row, reused across rows.
pub(super) struct RowPlan {
    width: usize,
    w_bound: usize,
    score: Vec<i32>,
    back: Vec<u32>,
}

impl RowPlan {
    pub fn new(width: usize) -> Self {
        let w_bound = width + SHOOT;
        let cells = w_bound * w_bound * KINDS;
        Self {
            width,
            w_bound,
            score: vec![NO_SCORE; cells],
            back: vec![NO_BACK; cells],
        }
    }

    fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.w_bound + j) * KINDS + k
    }

    fn unpack(&self, packed: u32) -> (usize, usize, usize) {
        let idx = packed as usize;
        let k = idx % KINDS;
        let j = (idx / KINDS) % self.w_bound;
        let i = idx / (KINDS * self.w_bound);
        (i, j, k)
    }

    /// Improve a state, breaking score ties with a coin flip.
    fn relax<R: Rng>(&mut self, i: usize, j: usize, k: usize, val: i32, from: u32, rng: &mut R) {
        let idx = self.idx(i, j, k);
        let cur = self.score[idx];
        if val > cur || (val == cur && rng.random_bool(0.5)) {
            self.score[idx] = val;
            self.back[idx] = from;
        }
    }

    /// Solve one row: fill the tables, pick a terminal state, and rebuild
    /// the segment sequence behind it.
    pub fn solve<R: Rng>(&mut self, ctx: &RowContext, rng: &mut R) -> SolvedRow {
        self.score.fill(NO_SCORE);
        self.back.fill(NO_BACK);

        let wb = self.w_bound;
        let remaining = ctx.tokens.len();
        let j_hi = remaining.min(wb - 1);

        let origin = self.idx(0, 0, K_SPACE);
        self.score[origin] = 0;

        for i in 0..wb {
            // Every token covers at least one column, so j never exceeds i.
            for j in 0..=j_hi.min(i) {
                for k in 0..KINDS {
                    let s = self.score[self.idx(i, j, k)];
                    if s == NO_SCORE {
                        continue;
                    }
                    let from = self.idx(i, j, k) as u32;

                    // Single space.
                    if i + 1 < wb {
                        self.relax(i + 1, j, K_SPACE, s + ctx.space_gain(i), from, rng);
                    }

                    // Synthesized comment. Never directly after a token
                    // that still owes its neighbour a separator, and never
                    // after a token ending in '/': the adjacency would
                    // open a line comment and swallow the rest of the row.
                    let after_slash_token =
                        k == K_TOKEN_FREE && j > 0 && ctx.tokens[j - 1].ends_with('/');
                    if k != K_TOKEN_SEP && !after_slash_token && i + MIN_COMMENT_LEN < wb {
                        let max_len = MAX_COMMENT_LEN.min(wb - i - 1);
                        for len in MIN_COMMENT_LEN..=max_len {
                            self.relax(
                                i + len,
                                j,
                                K_COMMENT,
                                s + ctx.comment_gain(i, len),
                                from,
                                rng,
                            );
                        }
                    }

                    // Next token.
                    if j < remaining && k != K_TOKEN_SEP {
                        let token = &ctx.tokens[j];
                        if i + token.len() < wb {
                            let kind = if j + 1 < remaining
                                && needs_separator(token, &ctx.tokens[j + 1])
                            {
                                K_TOKEN_SEP
                            } else {
                                K_TOKEN_FREE
                            };
                            self.relax(
                                i + token.len(),
                                j + 1,
                                kind,
                                s + ctx.token_gain(i, token),
                                from,
                                rng,
                            );
                        }
                    }
                }
            }
        }

        let terminal = self.select(remaining, j_hi);
        self.reconstruct(ctx, terminal, rng)
    }

    /// Pick the terminal state: prefer rows that consume more tokens,
    /// trading up to `width / 10` score for throughput, with a soft
    /// minimum of tokens per row that relaxes when nothing satisfies it.
    fn select(&self, remaining: usize, j_hi: usize) -> (usize, usize, usize) {
        let i_start = self.width.saturating_sub(SHOOT);
        let relaxation = (self.width / 10) as i32;

        let mut min_tok = MIN_ROW_TOKENS.min(remaining);
        loop {
            let mut best = NO_SCORE;
            for i in i_start..self.w_bound {
                for j in min_tok..=j_hi {
                    for k in 0..KINDS {
                        best = best.max(self.score[self.idx(i, j, k)]);
                    }
                }
            }
            if best == NO_SCORE {
                if min_tok == 0 {
                    unreachable!("the all-space prefix always lands in the selection window");
                }
                min_tok -= 1;
                continue;
            }

            let threshold = best - relaxation;
            for j in (min_tok..=j_hi).rev() {
                let mut slice_best = NO_SCORE;
                let mut state = None;
                for i in i_start..self.w_bound {
                    for k in 0..KINDS {
                        let s = self.score[self.idx(i, j, k)];
                        if s >= threshold && s > slice_best {
                            slice_best = s;
                            state = Some((i, j, k));
                        }
                    }
                }
                if let Some(found) = state {
                    return found;
                }
            }

            // A state attaining `best` sits in some slice at or above the
            // floor, so the threshold scan cannot come up empty.
            unreachable!("threshold scan missed the best state");
        }
    }

    /// Walk back-pointers from the terminal and emit the row text.
    fn reconstruct<R: Rng>(
        &self,
        ctx: &RowContext,
        terminal: (usize, usize, usize),
        rng: &mut R,
    ) -> SolvedRow {
        let consumed = terminal.1;
        let (mut i, mut j, mut k) = terminal;
        let mut segments = Vec::new();

        while (i, j, k) != (0, 0, K_SPACE) {
            let packed = self.back[self.idx(i, j, k)];
            debug_assert_ne!(packed, NO_BACK, "reachable state without a back-pointer");
            let (pi, pj, pk) = self.unpack(packed);
            segments.push(match k {
                K_SPACE => Segment::Space,
                K_COMMENT => Segment::Comment {
                    col: pi,
                    len: i - pi,
                },
                _ => Segment::Token(pj),
            });
            (i, j, k) = (pi, pj, pk);
        }
        segments.reverse();

        let mut text = String::new();
        for segment in &segments {
            match *segment {
                Segment::Space => text.push(' '),
                Segment::Comment { col, len } => {
                    text.push_str("/*");
                    for c in col + 2..col + len - 2 {
                        if ctx.wanted(c) {
                            text.push(rng.random_range(b'a'..=b'z') as char);
                        } else {
                            text.push(' ');
                        }
                    }
                    text.push_str("*/");
                }
                Segment::Token(idx) => text.push_str(&ctx.tokens[idx]),
            }
        }

        SolvedRow { text, consumed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn solve(tokens: &[&str], grid: &ArtGrid, row: usize) -> SolvedRow {
        let owned: Vec<Token> = tokens.iter().map(|t| t.to_string()).collect();
        let map = DensityMap::binary();
        let ctx = RowContext {
            tokens: &owned,
            grid,
            map: &map,
            row,
        };
        let mut rng = StdRng::seed_from_u64(11);
        RowPlan::new(grid.width()).solve(&ctx, &mut rng)
    }

    #[test]
    fn test_empty_row_all_background_is_spaces() {
        let grid = ArtGrid::new(80, 1);
        let solved = solve(&[], &grid, 0);
        assert_eq!(solved.consumed, 0);
        assert!(solved.text.chars().all(|c| c == ' '));
        assert!(solved.text.len() >= 70 && solved.text.len() < 90);
    }

    #[test]
    fn test_full_foreground_row_tiles_comments() {
        let grid = ArtGrid::from_fn(80, 1, |_, _| true);
        let solved = solve(&[], &grid, 0);
        assert_eq!(solved.text.len(), 89);
        // Columns inside the image are covered without spaces; the tail
        // past the right edge is background.
        assert!(!solved.text[..80].contains(' '));
        assert!(solved.text[80..].chars().all(|c| c == ' '));
        assert!(!solved.text.contains("*/*"));
    }

    #[test]
    fn test_separator_requiring_tokens_get_a_space() {
        let grid = ArtGrid::new(80, 1);
        let solved = solve(&["const", "char"], &grid, 0);
        assert_eq!(solved.consumed, 2);
        assert!(!solved.text.contains("constchar"));
    }

    #[test]
    fn test_free_tokens_may_touch() {
        let grid = ArtGrid::from_fn(80, 1, |_, c| c < 4);
        let solved = solve(&["(", ")", "{", "}"], &grid, 0);
        assert_eq!(solved.consumed, 4);
        // Four foreground cells at the left edge pull the brackets
        // together into one dense run.
        assert!(solved.text.starts_with("(){}"));
    }

    #[test]
    fn test_comment_never_follows_slash_token() {
        // A row wanting density right after a '/' token must not produce
        // the text "//*".
        let grid = ArtGrid::from_fn(80, 1, |_, _| true);
        let solved = solve(&["/"], &grid, 0);
        assert!(!solved.text.contains("//*"));
    }

    #[test]
    fn test_consumed_tokens_are_a_prefix() {
        let grid = ArtGrid::new(80, 1);
        let tokens = ["a", "b", "c", "d", "e", "f"];
        let solved = solve(&tokens, &grid, 0);
        let emitted: Vec<&str> = solved.text.split_whitespace().collect();
        assert_eq!(&emitted[..], &tokens[..solved.consumed]);
    }

    #[test]
    fn test_soft_minimum_prefers_token_throughput() {
        let grid = ArtGrid::new(80, 1);
        let tokens = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let solved = solve(&tokens, &grid, 0);
        assert!(solved.consumed >= 4);
    }
}
