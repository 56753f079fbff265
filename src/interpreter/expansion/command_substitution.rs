//! Command Substitution
//!
//! `$(...)` runs its statements with stdout captured into a buffer. The
//! nested statements run in their own scope, so variables they set do not
//! leak into the enclosing word. Trailing newlines are stripped from the
//! captured text; the nested exit status is discarded.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::types::ScriptNode;
use crate::commands::{buffer_text, OutputBuffer};
use crate::interpreter::errors::ShellResult;
use crate::interpreter::Interpreter;

pub fn run_command_substitution(interp: &mut Interpreter, body: &ScriptNode) -> ShellResult<String> {
    let buffer: OutputBuffer = Rc::new(RefCell::new(Vec::new()));
    let captured = interp.streams().with_stdout(buffer.clone());
    let previous = interp.replace_streams(captured);
    let guard = interp.env_mut().push_scope();

    let mut result = Ok(0);
    for statement in &body.statements {
        result = interp.execute_statement(statement);
        if result.is_err() {
            break;
        }
    }

    interp.env_mut().pop_scope(guard);
    interp.replace_streams(previous);
    let status = result?;
    tracing::debug!(status, "command substitution finished");

    Ok(strip_trailing_newlines(buffer_text(&buffer)))
}

fn strip_trailing_newlines(mut output: String) -> String {
    let trimmed = output.trim_end_matches('\n').len();
    output.truncate(trimmed);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::types::AST;
    use crate::commands::{create_builtin_registry, Streams};
    use crate::interpreter::ShellError;

    fn interp() -> (Interpreter, OutputBuffer) {
        let (streams, stdout, _) = Streams::capture();
        let interp = Interpreter::new(create_builtin_registry()).with_streams(streams);
        (interp, stdout)
    }

    #[test]
    fn test_captures_and_strips_newlines() {
        let (mut interp, stdout) = interp();
        let body = AST::script(vec![
            AST::statement(AST::simple_call(&["echo", "one"])),
            AST::statement(AST::simple_call(&["echo", "-e", "two\\n\\n"])),
        ]);
        assert_eq!(run_command_substitution(&mut interp, &body).unwrap(), "one\ntwo");
        // Nothing reaches the outer stdout
        assert_eq!(buffer_text(&stdout), "");
    }

    #[test]
    fn test_nested_status_is_discarded() {
        let (mut interp, _) = interp();
        let body = AST::script(vec![AST::statement(AST::simple_call(&["false"]))]);
        assert_eq!(run_command_substitution(&mut interp, &body).unwrap(), "");
    }

    #[test]
    fn test_error_propagates_and_restores_state() {
        let (mut interp, stdout) = interp();
        let depth = interp.env().scope_depth();
        let body = AST::script(vec![AST::statement(AST::simple_call(&["nosuchcmd"]))]);
        assert!(matches!(
            run_command_substitution(&mut interp, &body),
            Err(ShellError::CommandNotFound { .. })
        ));
        assert_eq!(interp.env().scope_depth(), depth);

        interp.streams().write_stdout("outer").unwrap();
        assert_eq!(buffer_text(&stdout), "outer");
    }

    #[test]
    fn test_strip_trailing_newlines() {
        assert_eq!(strip_trailing_newlines("a\n\nb\n\n".to_string()), "a\n\nb");
        assert_eq!(strip_trailing_newlines("\n".to_string()), "");
    }
}
