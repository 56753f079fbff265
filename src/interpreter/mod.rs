//! Interpreter module
//!
//! This module contains the tree-walking execution engine: the variable
//! environment, word and arithmetic evaluation, and the statement
//! dispatcher that drives registered programs.

pub mod arithmetic;
pub mod environment;
pub mod errors;
pub mod expansion;
pub mod helpers;
#[allow(clippy::module_inception)]
pub mod interpreter;
pub mod stringify;
pub mod types;
pub mod word_expansion;

pub use arithmetic::evaluate_arithmetic;
pub use environment::{Environment, ScopeGuard};
pub use errors::{ShellError, ShellResult};
pub use interpreter::Interpreter;
pub use stringify::*;
pub use types::{InterpreterOptions, ScriptResult, SliceMode};
pub use word_expansion::{expand_part, expand_word};
