//! Lexical layer: comment stripping, tokenizing, and the separator oracle.
//!
//! The layout engine treats tokens as opaque byte strings. This module
//! produces that token stream from raw source text and answers the one
//! question layout needs: may two adjacent tokens touch, or would they
//! merge into a different token stream when re-lexed?

mod separator;
mod strip;
mod token;

pub use separator::{join_min_sep, needs_separator};
pub use strip::strip_comments;
pub use token::{tokenize, Token};
