// src/commands/mod.rs
pub mod echo;
pub mod printenv_cmd;
pub mod registry;
pub mod true_cmd;
pub mod types;

pub use registry::{create_builtin_registry, register_builtins, ProgramRegistry};
pub use types::{buffer_text, OutputBuffer, Program, SharedReader, SharedWriter, Streams};
