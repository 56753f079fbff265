//! walk-sh - A tree-walking shell execution engine
//!
//! This library executes already-parsed shell statement trees: it expands
//! words (quoting, parameter and arithmetic expansion, command
//! substitution), evaluates arithmetic with variable side effects, scopes
//! prefix assignments to a single call, and dispatches argument vectors to
//! registered programs.

pub mod ast;
pub mod commands;
pub mod config;
pub mod interpreter;

pub use ast::types::*;
pub use commands::{create_builtin_registry, Program, ProgramRegistry, Streams};
pub use config::{Config, ConfigError};
pub use interpreter::{
    Environment, Interpreter, InterpreterOptions, ScriptResult, ShellError, ShellResult, SliceMode,
};
