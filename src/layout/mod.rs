//! The layout engine.
//!
//! Interleaves tokens, spaces, and synthesized `/* */` comments across
//! fixed-width rows so that visible characters land where the target grid
//! wants foreground and spaces land where it wants background. Rows inside
//! the image are solved one at a time by dynamic programming; rows past
//! the image's bottom edge fall back to greedy packing.
//!
//! The emitted text re-tokenizes to the input token stream: tokens appear
//! verbatim and in order, tokens that would merge are kept apart by at
//! least one space, and comment interiors never contain `*/`.

mod overflow;
mod row;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::art::{ArtGrid, DensityMap};
use crate::lex::Token;

use row::{RowContext, RowPlan};

/// Horizontal overflow tolerance: rows may run up to this many columns
/// past the grid width, exclusive.
pub const SHOOT: usize = 10;

/// Narrowest grid the engine accepts.
pub const MIN_WIDTH: usize = 80;

/// Longest synthesized comment, delimiters included.
pub const MAX_COMMENT_LEN: usize = 20;

/// Soft minimum of tokens consumed per row, relaxed when unsatisfiable.
pub const MIN_ROW_TOKENS: usize = 4;

/// Lays tokens out over a target grid.
///
/// Holds the grid, the density classification, and the PRNG used for
/// tie-breaking, comment interiors, and overflow jitter. Rendering mutates
/// only the PRNG, so one engine can render several token streams.
pub struct LayoutEngine<'a> {
    grid: &'a ArtGrid,
    map: &'a DensityMap,
    rng: StdRng,
}

impl<'a> LayoutEngine<'a> {
    /// Create an engine seeded from the operating system.
    pub fn new(grid: &'a ArtGrid, map: &'a DensityMap) -> Self {
        Self {
            grid,
            map,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create an engine with a fixed seed for reproducible output.
    pub fn with_seed(grid: &'a ArtGrid, map: &'a DensityMap, seed: u64) -> Self {
        Self {
            grid,
            map,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Render the token stream over the target grid.
    ///
    /// Emits at least `height` newline-terminated rows, each shorter than
    /// `width + SHOOT` bytes. Tokens left over once the grid is exhausted
    /// are packed into overflow rows below it.
    ///
    /// # Panics
    ///
    /// When the grid is narrower than [`MIN_WIDTH`] or a token cannot fit
    /// within `width + SHOOT - 1` columns.
    pub fn render(&mut self, tokens: &[Token]) -> String {
        let width = self.grid.width();
        let height = self.grid.height();
        let w_bound = width + SHOOT;
        let longest = tokens.iter().map(|t| t.len()).max().unwrap_or(0);

        assert!(
            width >= MIN_WIDTH,
            "grid width {width} is below the {MIN_WIDTH}-column floor"
        );
        assert!(
            longest < w_bound,
            "token of {longest} bytes cannot fit in {w_bound} columns"
        );

        let mut out = String::new();
        let mut taken = 0;

        if height > 0 {
            let mut plan = RowPlan::new(width);
            for row in 0..height {
                let ctx = RowContext {
                    tokens: &tokens[taken..],
                    grid: self.grid,
                    map: self.map,
                    row,
                };
                let solved = plan.solve(&ctx, &mut self.rng);
                out.push_str(&solved.text);
                out.push('\n');
                taken += solved.consumed;
            }
        }

        if taken < tokens.len() {
            overflow::pack_rows(&mut out, &tokens[taken..], width, &mut self.rng);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::{strip_comments, tokenize};

    fn render_seeded(tokens: &[&str], grid: &ArtGrid) -> String {
        let map = DensityMap::binary();
        let owned: Vec<Token> = tokens.iter().map(|t| t.to_string()).collect();
        LayoutEngine::with_seed(grid, &map, 7).render(&owned)
    }

    fn retokenize(output: &str) -> Vec<Token> {
        tokenize(&strip_comments(output))
    }

    #[test]
    fn test_empty_tokens_empty_grid_is_empty_output() {
        let grid = ArtGrid::new(80, 0);
        assert_eq!(render_seeded(&[], &grid), "");
    }

    #[test]
    fn test_single_token_no_grid() {
        let grid = ArtGrid::new(80, 0);
        assert_eq!(render_seeded(&["x"], &grid), "x\n");
    }

    #[test]
    fn test_height_floor_with_no_tokens() {
        let grid = ArtGrid::new(80, 3);
        let out = render_seeded(&[], &grid);
        assert_eq!(out.lines().count(), 3);
        assert!(retokenize(&out).is_empty());
    }

    #[test]
    fn test_background_row_keeps_separator() {
        let grid = ArtGrid::new(80, 1);
        let out = render_seeded(&["int", "a"], &grid);
        let line = out.lines().next().unwrap();
        assert!(line.len() < 90);
        assert_eq!(retokenize(&out), vec!["int", "a"]);
        // With an all-background row, the tokens must still not touch.
        assert!(!out.contains("inta"));
    }

    #[test]
    fn test_foreground_row_synthesizes_comments() {
        let grid = ArtGrid::from_fn(80, 1, |_, _| true);
        let out = render_seeded(&[";"], &grid);
        assert!(out.contains("/*"));
        assert!(out.contains("*/"));
        assert_eq!(retokenize(&out), vec![";"]);
    }

    #[test]
    fn test_plus_plus_never_merges() {
        let grid = ArtGrid::new(80, 1);
        let out = render_seeded(&["+", "+"], &grid);
        assert!(!out.contains("++"));
        assert_eq!(retokenize(&out), vec!["+", "+"]);
    }

    #[test]
    fn test_overflow_packs_in_order() {
        let tokens: Vec<String> = (0..50).map(|i| format!("ident{:05}", i)).collect();
        let refs: Vec<&str> = tokens.iter().map(|s| s.as_str()).collect();
        let grid = ArtGrid::new(80, 0);
        let out = render_seeded(&refs, &grid);
        for line in out.lines() {
            assert!(line.len() < 90);
        }
        assert_eq!(retokenize(&out), tokens);
    }

    #[test]
    fn test_raw_string_survives_verbatim() {
        let raw = r#"R"(hello /* not a comment */)""#;
        let grid = ArtGrid::new(80, 2);
        let out = render_seeded(&["auto", "s", "=", raw, ";"], &grid);
        assert!(out.contains(raw));
        assert_eq!(retokenize(&out), vec!["auto", "s", "=", raw, ";"]);
    }

    #[test]
    fn test_width_bound_holds_across_rows() {
        let grid = ArtGrid::from_fn(80, 4, |r, c| (r + c) % 3 != 0);
        let tokens: Vec<String> = (0..40).map(|i| format!("v{}", i)).collect();
        let refs: Vec<&str> = tokens.iter().map(|s| s.as_str()).collect();
        let out = render_seeded(&refs, &grid);
        assert!(out.lines().count() >= 4);
        for line in out.lines() {
            assert!(line.len() < 90, "line too long: {}", line.len());
        }
        assert_eq!(retokenize(&out), tokens);
    }

    #[test]
    fn test_token_filling_exact_bound_fits_alone() {
        let big = "x".repeat(89);
        let grid = ArtGrid::new(80, 0);
        let out = render_seeded(&[big.as_str()], &grid);
        assert_eq!(out, format!("{}\n", big));
    }

    #[test]
    #[should_panic(expected = "cannot fit")]
    fn test_oversized_token_panics() {
        let big = "x".repeat(90);
        let grid = ArtGrid::new(80, 0);
        render_seeded(&[big.as_str()], &grid);
    }

    #[test]
    #[should_panic(expected = "below the 80-column floor")]
    fn test_narrow_grid_panics() {
        let grid = ArtGrid::new(40, 1);
        render_seeded(&["x"], &grid);
    }

    #[test]
    fn test_seeded_render_is_reproducible() {
        let grid = ArtGrid::from_fn(80, 2, |_, c| c % 2 == 0);
        let tokens = ["int", "main", "(", ")", "{", "return", "0", ";", "}"];
        let a = render_seeded(&tokens, &grid);
        let b = render_seeded(&tokens, &grid);
        assert_eq!(a, b);
    }

    #[test]
    fn test_token_order_preserved_across_many_rows() {
        let source = "int main(){int acc=0;for(int i=0;i<100;++i){acc+=i*i;}return acc;}";
        let tokens = tokenize(source);
        let grid = ArtGrid::from_fn(80, 3, |r, c| c / 10 % 2 == r % 2);
        let map = DensityMap::binary();
        let out = LayoutEngine::with_seed(&grid, &map, 42).render(&tokens);
        assert_eq!(retokenize(&out), tokens);
    }
}
