//! Input validation for the weave pipeline.
//!
//! The CLI runs these checks on the token stream and target grid before
//! any layout work starts, and exits with code 1 when a fatal finding
//! turns up. The engine asserts the same hard limits itself, so library
//! callers that skip validation still fail loudly rather than quietly
//! misrender.

use crate::art::ArtGrid;
use crate::layout::{MIN_WIDTH, SHOOT};
use crate::lex::Token;
use crate::output::{count, Printer, Tone};

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// Whether a finding of this severity should stop the run.
    pub fn is_fatal(self) -> bool {
        matches!(self, Severity::Error)
    }

    fn tone(self) -> Tone {
        match self {
            Severity::Error => Tone::Fail,
            Severity::Warning => Tone::Warn,
        }
    }
}

/// One finding about the inputs.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable identifier for the check that fired.
    pub code: &'static str,
    pub message: String,
    /// Suggested fix, shown indented under the message.
    pub help: Option<String>,
}

/// Run every input check. Findings come back in check order: hard limits
/// first, then advisories.
pub fn validate_inputs(tokens: &[Token], grid: &ArtGrid) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    check_grid_width(grid, &mut findings);
    check_token_fit(tokens, grid, &mut findings);
    check_empty_code(tokens, &mut findings);
    check_blank_art(grid, &mut findings);
    findings
}

/// Whether any finding is fatal.
pub fn has_errors(findings: &[Diagnostic]) -> bool {
    findings.iter().any(|d| d.severity.is_fatal())
}

/// Print the findings and a one-line summary.
pub fn print_diagnostics(findings: &[Diagnostic], printer: &Printer) {
    for finding in findings {
        printer.diagnostic(
            finding.severity.tone(),
            finding.code,
            &finding.message,
            finding.help.as_deref(),
        );
    }

    let fatal = findings.iter().filter(|d| d.severity.is_fatal()).count();
    let mild = findings.len() - fatal;
    if fatal > 0 {
        printer.line(
            Tone::Fail,
            "Invalid",
            &format!("{}, {}", count(fatal, "error"), count(mild, "warning")),
        );
    } else if mild > 0 {
        printer.line(Tone::Warn, "Checked", &count(mild, "warning"));
    }
}

fn check_grid_width(grid: &ArtGrid, findings: &mut Vec<Diagnostic>) {
    if grid.width() >= MIN_WIDTH {
        return;
    }
    findings.push(Diagnostic {
        severity: Severity::Error,
        code: "narrow-art",
        message: format!(
            "art is {} columns wide; the layout needs at least {}",
            grid.width(),
            MIN_WIDTH
        ),
        help: Some(format!("pass --width {MIN_WIDTH} or use wider art")),
    });
}

fn check_token_fit(tokens: &[Token], grid: &ArtGrid, findings: &mut Vec<Diagnostic>) {
    let bound = grid.width() + SHOOT;
    let longest = tokens.iter().map(|t| t.len()).max().unwrap_or(0);
    if longest < bound {
        return;
    }
    findings.push(Diagnostic {
        severity: Severity::Error,
        code: "oversized-token",
        message: format!("a {longest}-byte token cannot fit within {bound} columns"),
        help: Some("widen the art or break the token up in the source".to_string()),
    });
}

fn check_empty_code(tokens: &[Token], findings: &mut Vec<Diagnostic>) {
    if tokens.is_empty() {
        findings.push(Diagnostic {
            severity: Severity::Warning,
            code: "empty-code",
            message: "the code input produced no tokens; output will be art-only".to_string(),
            help: None,
        });
    }
}

fn check_blank_art(grid: &ArtGrid, findings: &mut Vec<Diagnostic>) {
    if grid.height() > 0 && grid.foreground_count() == 0 {
        findings.push(Diagnostic {
            severity: Severity::Warning,
            code: "blank-art",
            message: "the art has no foreground cells; output will be sparse".to_string(),
            help: None,
        });
    }
}
