use miette::Diagnostic;
use thiserror::Error;

/// Main error type for beadwork operations
#[derive(Error, Diagnostic, Debug)]
pub enum BeadError {
    #[error("IO error: {0}")]
    #[diagnostic(code(beadwork::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(beadwork::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    /// The image or palette handed to the pipeline cannot be used.
    #[error("Input error: {message}")]
    #[diagnostic(code(beadwork::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// An operation was invoked in the wrong state or with an unknown name.
    #[error("Usage error: {message}")]
    #[diagnostic(code(beadwork::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(beadwork::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl BeadError {
    pub(crate) fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help: None,
        }
    }

    /// Whether this is a caller usage error rather than bad input.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage { .. })
    }
}

pub type Result<T> = std::result::Result<T, BeadError>;
