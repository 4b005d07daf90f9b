use thiserror::Error;

use storekeep_core::DomainError;

/// Errors raised while reading or executing a session command.
///
/// Everything except `Io` is reported to the user and the session continues.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown command `{0}`; type `help` to see the menu")]
    UnknownCommand(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),

    #[error("`{0}` is not a valid price")]
    InvalidPrice(String),

    #[error("input line is not valid UTF-8")]
    InvalidInput,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// Whether the session can keep going after reporting this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_))
    }

    /// Stable machine-readable kind, used for JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => "unknown_command",
            Self::MissingArgument(_) => "missing_argument",
            Self::UnexpectedArgument(_) => "unexpected_argument",
            Self::InvalidPrice(_) => "invalid_price",
            Self::InvalidInput => "invalid_input",
            Self::Domain(e) => e.kind(),
            Self::Io(_) => "io",
        }
    }
}
