use miette::Diagnostic;
use thiserror::Error;

/// Main error type for codeweave operations
#[derive(Error, Diagnostic, Debug)]
pub enum WeaveError {
    #[error("IO error: {0}")]
    #[diagnostic(code(weave::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(weave::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(weave::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Layout error: {message}")]
    #[diagnostic(code(weave::layout))]
    Layout {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, WeaveError>;
