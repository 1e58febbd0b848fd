//! codeweave - source code as ASCII art
//!
//! A library for reformatting a program so that the silhouette of its text
//! approximates an ASCII-art image. The emitted text re-tokenizes to the
//! original token stream: tokens keep their order and spelling, and only
//! whitespace, line breaks, and synthesized `/* */` comments are added.

pub mod art;
pub mod cli;
pub mod error;
pub mod layout;
pub mod lex;
pub mod output;
pub mod validate;

pub use art::{parse_art, ArtGrid, DensityMap, DensityOverrides, ImageGridOptions};
pub use error::{Result, WeaveError};
pub use layout::{LayoutEngine, MAX_COMMENT_LEN, MIN_ROW_TOKENS, MIN_WIDTH, SHOOT};
pub use lex::{join_min_sep, needs_separator, strip_comments, tokenize, Token};
pub use validate::{has_errors, validate_inputs, Diagnostic, Severity};
