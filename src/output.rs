//! Status output for the codeweave CLI.
//!
//! Everything human-facing goes to stderr; stdout stays free in case the
//! woven program is ever streamed instead of written to a file. Progress
//! lines lead with a right-aligned verb, and validation findings render
//! as `severity[code]: message` with the code dimmed and any help text
//! indented underneath.

use std::io::{self, IsTerminal, Write};

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// How a line should read at a glance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Pipeline progress: weaving, writing.
    Step,
    /// Supplementary facts: loaded overrides, dimensions.
    Note,
    /// Something odd but survivable.
    Warn,
    /// Something fatal.
    Fail,
}

impl Tone {
    fn colour(self) -> &'static str {
        match self {
            Tone::Step => "\x1b[32m",
            Tone::Note => "\x1b[36m",
            Tone::Warn => "\x1b[33m",
            Tone::Fail => "\x1b[31m",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tone::Warn => "warning",
            Tone::Fail => "error",
            Tone::Step | Tone::Note => "note",
        }
    }
}

/// Terminal-aware stderr printer for the weave pipeline.
///
/// Colour switches on when stderr is a terminal. Quiet mode drops
/// progress ([`Tone::Step`]) and fact ([`Tone::Note`]) lines; warnings
/// and failures always print.
pub struct Printer {
    colour: bool,
    quiet: bool,
}

impl Printer {
    pub fn new(quiet: bool) -> Self {
        Self {
            colour: io::stderr().is_terminal(),
            quiet,
        }
    }

    /// Print a verb-led status line, e.g. `Weaving 412 tokens into ...`.
    pub fn line(&self, tone: Tone, verb: &str, message: &str) {
        if self.quiet && matches!(tone, Tone::Step | Tone::Note) {
            return;
        }
        let mut stderr = io::stderr().lock();
        if self.colour {
            let colour = tone.colour();
            let _ = writeln!(stderr, "{BOLD}{colour}{verb:>12}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>12} {message}");
        }
    }

    /// Print one validation finding, with optional help indented under it.
    pub fn diagnostic(&self, tone: Tone, code: &str, message: &str, help: Option<&str>) {
        let mut stderr = io::stderr().lock();
        if self.colour {
            let colour = tone.colour();
            let label = tone.label();
            let _ = writeln!(
                stderr,
                "{BOLD}{colour}{label}{RESET}{DIM}[{code}]{RESET}: {message}"
            );
        } else {
            let _ = writeln!(stderr, "{}[{code}]: {message}", tone.label());
        }
        if let Some(help) = help {
            let _ = writeln!(stderr, "        help: {help}");
        }
    }
}

/// Format a count with its noun, pluralized with a plain `s`:
/// `count(3, "token")` → "3 tokens".
pub fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
