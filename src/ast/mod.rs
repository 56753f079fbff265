//! Abstract Syntax Tree (AST) Types for shell scripts
//!
//! This module defines the tree the interpreter walks. The tree is produced
//! by an external parser and handed over already validated.
//!
//! Architecture:
//!   (external parser) → AST → Expander → Interpreter → Output

pub mod types;
