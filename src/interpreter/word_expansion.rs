//! Word Expansion
//!
//! Main entry point for shell word expansion. A word expands to exactly one
//! string: the concatenation of its expanded parts, with no separators and
//! no field splitting.
//!
//! - Literal and single-quoted text is taken verbatim
//! - Double-quoted text expands its inner parts
//! - Parameter expansion ($VAR, ${VAR...}) lives in expansion/parameter_ops.rs
//! - Arithmetic expansion $((...)) goes through the arithmetic evaluator
//! - Command substitution $(...) lives in expansion/command_substitution.rs
//!
//! Brace expansion, extended globs and process substitution are reported as
//! unsupported.

use crate::ast::types::{WordNode, WordPart};
use crate::interpreter::errors::{ShellError, ShellResult};
use crate::interpreter::expansion::{expand_parameter, run_command_substitution};
use crate::interpreter::Interpreter;

/// Expand a word to its string value.
pub fn expand_word(interp: &mut Interpreter, word: &WordNode) -> ShellResult<String> {
    expand_parts(interp, &word.parts)
}

fn expand_parts(interp: &mut Interpreter, parts: &[WordPart]) -> ShellResult<String> {
    let mut result = String::new();
    for part in parts {
        result.push_str(&expand_part(interp, part)?);
    }
    Ok(result)
}

/// Expand a single word part.
pub fn expand_part(interp: &mut Interpreter, part: &WordPart) -> ShellResult<String> {
    match part {
        WordPart::Literal(p) => Ok(p.value.clone()),
        WordPart::SingleQuoted(p) => Ok(p.value.clone()),
        WordPart::DoubleQuoted(p) => expand_parts(interp, &p.parts),
        WordPart::ParameterExpansion(p) => expand_parameter(interp, p),
        WordPart::ArithmeticExpansion(p) => interp.evaluate_arithmetic(&p.expression),
        WordPart::CommandSubstitution(p) => run_command_substitution(interp, &p.body),
        WordPart::BraceExpansion(_) => Err(ShellError::unsupported("brace expansion")),
        WordPart::ExtGlob(_) => Err(ShellError::unsupported("extended glob")),
        WordPart::ProcessSubstitution(_) => Err(ShellError::unsupported("process substitution")),
    }
}
