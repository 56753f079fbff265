//! Interpreter Errors
//!
//! Error kinds raised while expanding words, evaluating arithmetic and
//! dispatching calls. Any of these aborts the current statement; the script
//! driver decides whether the script continues.

use thiserror::Error;

/// Unified error enum for all interpreter errors.
#[derive(Error, Debug)]
pub enum ShellError {
    /// Non-numeric arithmetic operand or slice bound
    #[error("{operand}: invalid number (error token is \"{operand}\")")]
    ParseOperand { operand: String },

    /// ${!name} where name itself is unset
    #[error("{name}: invalid indirect expansion")]
    InvalidIndirectExpansion { name: String },

    #[error("{name}: command not found")]
    CommandNotFound { name: String },

    /// The argument vector expanded to nothing
    #[error("invalid command: no command name")]
    InvalidCommand,

    /// Failure reported by a registered program
    #[error("{program}: {message}")]
    Program { program: String, message: String },

    #[error("{offset}:{length}: substring expression out of range (value has {len} characters)")]
    SliceOutOfRange { offset: i64, length: i64, len: usize },

    /// ++/-- applied to something that does not name a variable
    #[error("{operand}: attempted assignment to non-variable")]
    NotAVariable { operand: String },

    #[error("division by 0")]
    DivisionByZero,

    #[error("exponent less than 0")]
    NegativeExponent,

    /// A construct the interpreter represents but does not execute
    #[error("{construct}: not supported")]
    Unsupported { construct: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ShellError {
    pub fn program(program: impl Into<String>, message: impl Into<String>) -> Self {
        ShellError::Program {
            program: program.into(),
            message: message.into(),
        }
    }

    pub fn unsupported(construct: impl Into<String>) -> Self {
        ShellError::Unsupported {
            construct: construct.into(),
        }
    }

    pub fn parse_operand(operand: impl Into<String>) -> Self {
        ShellError::ParseOperand {
            operand: operand.into(),
        }
    }
}

pub type ShellResult<T> = Result<T, ShellError>;
