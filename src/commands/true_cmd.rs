use crate::commands::{Program, Streams};
use crate::interpreter::{Interpreter, ShellResult};

pub struct TrueProgram;

impl Program for TrueProgram {
    fn name(&self) -> &'static str {
        "true"
    }

    fn run(&self, _io: &Streams, _interpreter: &mut Interpreter, _args: &[String]) -> ShellResult<i32> {
        Ok(0)
    }
}

pub struct FalseProgram;

impl Program for FalseProgram {
    fn name(&self) -> &'static str {
        "false"
    }

    fn run(&self, _io: &Streams, _interpreter: &mut Interpreter, _args: &[String]) -> ShellResult<i32> {
        Ok(1)
    }
}

/// `:` ignores its arguments and succeeds
pub struct ColonProgram;

impl Program for ColonProgram {
    fn name(&self) -> &'static str {
        ":"
    }

    fn run(&self, _io: &Streams, _interpreter: &mut Interpreter, _args: &[String]) -> ShellResult<i32> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{buffer_text, ProgramRegistry};

    fn run(program: &dyn Program, args: &[&str]) -> (i32, String) {
        let (io, stdout, _) = Streams::capture();
        let mut interpreter = Interpreter::new(ProgramRegistry::new());
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let code = program.run(&io, &mut interpreter, &args).unwrap();
        (code, buffer_text(&stdout))
    }

    #[test]
    fn test_true_returns_zero() {
        assert_eq!(run(&TrueProgram, &[]), (0, String::new()));
    }

    #[test]
    fn test_false_returns_one() {
        assert_eq!(run(&FalseProgram, &[]), (1, String::new()));
    }

    #[test]
    fn test_colon_ignores_args() {
        assert_eq!(run(&ColonProgram, &["anything", "at all"]), (0, String::new()));
    }
}
