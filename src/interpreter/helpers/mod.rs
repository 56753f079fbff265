//! Interpreter helper functions

pub mod xtrace;

pub use xtrace::{get_xtrace_prefix, DEFAULT_PS4};
