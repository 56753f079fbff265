use crate::commands::{Program, Streams};
use crate::interpreter::{Interpreter, ShellResult};

/// printenv [NAME...]
///
/// With names, prints each set value on its own line and fails if any name
/// is unset. Without names, prints every visible binding as `NAME=value`.
pub struct PrintenvProgram;

impl Program for PrintenvProgram {
    fn name(&self) -> &'static str {
        "printenv"
    }

    fn run(&self, io: &Streams, interpreter: &mut Interpreter, args: &[String]) -> ShellResult<i32> {
        let env = interpreter.env();
        let mut output = String::new();

        if args.is_empty() {
            for (name, value) in env.iter() {
                output.push_str(&format!("{}={}\n", name, value));
            }
            io.write_stdout(&output)?;
            return Ok(0);
        }

        let mut exit_code = 0;
        for name in args {
            match env.get_raw(name) {
                Some(value) => {
                    output.push_str(value);
                    output.push('\n');
                }
                None => exit_code = 1,
            }
        }
        io.write_stdout(&output)?;
        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{buffer_text, ProgramRegistry};
    use crate::interpreter::Environment;

    fn printenv(env: Environment, args: &[&str]) -> (i32, String) {
        let (io, stdout, _) = Streams::capture();
        let mut interpreter = Interpreter::new(ProgramRegistry::new()).with_env(env);
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let code = PrintenvProgram.run(&io, &mut interpreter, &args).unwrap();
        (code, buffer_text(&stdout))
    }

    #[test]
    fn test_printenv_named() {
        let env = Environment::from_iter([("x", "1"), ("y", "")]);
        assert_eq!(printenv(env, &["x", "y"]), (0, "1\n\n".to_string()));
    }

    #[test]
    fn test_printenv_unset_name_fails() {
        let env = Environment::from_iter([("x", "1")]);
        assert_eq!(printenv(env, &["missing", "x"]), (1, "1\n".to_string()));
    }

    #[test]
    fn test_printenv_all() {
        let env = Environment::from_iter([("b", "2"), ("a", "1")]);
        assert_eq!(printenv(env, &[]), (0, "b=2\na=1\n".to_string()));
    }
}
