// src/commands/echo/mod.rs
use crate::commands::{Program, Streams};
use crate::interpreter::{Interpreter, ShellResult};

pub struct EchoProgram;

impl Program for EchoProgram {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn run(&self, io: &Streams, _interpreter: &mut Interpreter, args: &[String]) -> ShellResult<i32> {
        let mut no_newline = false;
        let mut interpret_escapes = false;
        let mut start_index = 0;

        // Parse flags
        while start_index < args.len() {
            match args[start_index].as_str() {
                "-n" => no_newline = true,
                "-e" => interpret_escapes = true,
                "-E" => interpret_escapes = false,
                "-ne" | "-en" => {
                    no_newline = true;
                    interpret_escapes = true;
                }
                _ => break,
            }
            start_index += 1;
        }

        let mut output = args[start_index..].join(" ");

        if interpret_escapes {
            let result = process_escapes(&output);
            output = result.output;
            if result.stop {
                // \c: everything after it, trailing newline included, is dropped
                io.write_stdout(&output)?;
                return Ok(0);
            }
        }

        if !no_newline {
            output.push('\n');
        }

        io.write_stdout(&output)?;
        Ok(0)
    }
}

/// Result of processing escape sequences
struct EscapeResult {
    output: String,
    stop: bool,
}

/// Collects up to `max` digits of `radix` starting at `start`.
fn take_digits(chars: &[char], start: usize, max: usize, radix: u32) -> String {
    chars[start.min(chars.len())..]
        .iter()
        .take(max)
        .take_while(|c| c.is_digit(radix))
        .collect()
}

/// Process echo -e escape sequences
fn process_escapes(input: &str) -> EscapeResult {
    let mut result = String::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' {
            result.push(chars[i]);
            i += 1;
            continue;
        }
        if i + 1 >= chars.len() {
            result.push('\\');
            break;
        }

        let next = chars[i + 1];
        let simple = match next {
            '\\' => Some('\\'),
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'a' => Some('\x07'),
            'b' => Some('\x08'),
            'f' => Some('\x0c'),
            'v' => Some('\x0b'),
            'e' | 'E' => Some('\x1b'),
            _ => None,
        };
        if let Some(c) = simple {
            result.push(c);
            i += 2;
            continue;
        }

        match next {
            'c' => {
                return EscapeResult {
                    output: result,
                    stop: true,
                };
            }
            '0' => {
                // \0NNN: up to three octal digits after the 0
                let octal = take_digits(&chars, i + 2, 3, 8);
                let code = u32::from_str_radix(&octal, 8).unwrap_or(0) % 256;
                if let Some(c) = char::from_u32(code) {
                    result.push(c);
                }
                i += 2 + octal.len();
            }
            'x' | 'u' | 'U' => {
                let max = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let hex = take_digits(&chars, i + 2, max, 16);
                let decoded = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32);
                match decoded {
                    Some(c) if !hex.is_empty() => result.push(c),
                    _ => {
                        // no digits or not a code point: keep the text as written
                        result.push('\\');
                        result.push(next);
                        result.push_str(&hex);
                    }
                }
                i += 2 + hex.len();
            }
            _ => {
                // Unknown escape - keep the backslash and character
                result.push('\\');
                result.push(next);
                i += 2;
            }
        }
    }

    EscapeResult {
        output: result,
        stop: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{buffer_text, ProgramRegistry};

    fn echo(args: &[&str]) -> String {
        let (io, stdout, _) = Streams::capture();
        let mut interpreter = Interpreter::new(ProgramRegistry::new());
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let code = EchoProgram.run(&io, &mut interpreter, &args).unwrap();
        assert_eq!(code, 0);
        buffer_text(&stdout)
    }

    #[test]
    fn test_echo_simple_text() {
        assert_eq!(echo(&["hello", "world"]), "hello world\n");
    }

    #[test]
    fn test_echo_empty() {
        assert_eq!(echo(&[]), "\n");
    }

    #[test]
    fn test_echo_n_flag() {
        assert_eq!(echo(&["-n", "hello"]), "hello");
    }

    #[test]
    fn test_echo_e_flag_newline() {
        assert_eq!(echo(&["-e", "hello\\nworld"]), "hello\nworld\n");
    }

    #[test]
    fn test_echo_without_e_keeps_backslashes() {
        assert_eq!(echo(&["hello\\nworld"]), "hello\\nworld\n");
    }

    #[test]
    fn test_echo_combined_flags() {
        assert_eq!(echo(&["-en", "hello\\nworld"]), "hello\nworld");
        assert_eq!(echo(&["-ne", "a\\tb"]), "a\tb");
    }

    #[test]
    fn test_echo_e_disable() {
        assert_eq!(echo(&["-e", "-E", "hello\\nworld"]), "hello\\nworld\n");
    }

    #[test]
    fn test_echo_flags_stop_at_first_word() {
        assert_eq!(echo(&["hello", "-n"]), "hello -n\n");
    }

    #[test]
    fn test_echo_stop_escape() {
        assert_eq!(echo(&["-e", "abc\\cdef"]), "abc");
    }

    #[test]
    fn test_numeric_escapes() {
        assert_eq!(process_escapes("\\x41\\0101\\u00e9").output, "AAé");
        assert_eq!(process_escapes("\\xZZ").output, "\\xZZ");
        assert_eq!(process_escapes("\\q").output, "\\q");
        assert_eq!(process_escapes("tail\\").output, "tail\\");
    }
}
