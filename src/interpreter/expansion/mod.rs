//! Expansion submodules used by word_expansion.rs

pub mod command_substitution;
pub mod parameter_ops;

pub use command_substitution::run_command_substitution;
pub use parameter_ops::expand_parameter;
