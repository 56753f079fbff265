// src/commands/types.rs
use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::rc::Rc;

use crate::interpreter::{Interpreter, ShellResult};

/// Shared input handle; programs borrow it only for the duration of a read
pub type SharedReader = Rc<RefCell<dyn Read>>;
/// Shared output handle; programs borrow it only for the duration of a write
pub type SharedWriter = Rc<RefCell<dyn Write>>;
/// In-memory output sink, readable after the writes through its [`SharedWriter`] view
pub type OutputBuffer = Rc<RefCell<Vec<u8>>>;

/// The three standard streams handed to every program invocation.
#[derive(Clone)]
pub struct Streams {
    pub stdin: SharedReader,
    pub stdout: SharedWriter,
    pub stderr: SharedWriter,
}

impl Streams {
    pub fn new(stdin: SharedReader, stdout: SharedWriter, stderr: SharedWriter) -> Self {
        Self { stdin, stdout, stderr }
    }

    /// The process's real stdin/stdout/stderr.
    pub fn stdio() -> Self {
        Self::new(
            Rc::new(RefCell::new(io::stdin())),
            Rc::new(RefCell::new(io::stdout())),
            Rc::new(RefCell::new(io::stderr())),
        )
    }

    /// Empty input, discarded output.
    pub fn null() -> Self {
        Self::new(
            Rc::new(RefCell::new(io::empty())),
            Rc::new(RefCell::new(io::sink())),
            Rc::new(RefCell::new(io::sink())),
        )
    }

    /// Empty input with stdout and stderr captured into buffers.
    pub fn capture() -> (Self, OutputBuffer, OutputBuffer) {
        let stdout: OutputBuffer = Rc::new(RefCell::new(Vec::new()));
        let stderr: OutputBuffer = Rc::new(RefCell::new(Vec::new()));
        let streams = Self::new(
            Rc::new(RefCell::new(io::empty())),
            stdout.clone(),
            stderr.clone(),
        );
        (streams, stdout, stderr)
    }

    /// Same stdin and stderr, stdout replaced.
    pub fn with_stdout(&self, stdout: SharedWriter) -> Self {
        Self {
            stdin: self.stdin.clone(),
            stdout,
            stderr: self.stderr.clone(),
        }
    }

    pub fn write_stdout(&self, text: &str) -> ShellResult<()> {
        self.stdout.borrow_mut().write_all(text.as_bytes())?;
        Ok(())
    }

    pub fn write_stderr(&self, text: &str) -> ShellResult<()> {
        self.stderr.borrow_mut().write_all(text.as_bytes())?;
        Ok(())
    }

    pub fn flush(&self) -> ShellResult<()> {
        self.stdout.borrow_mut().flush()?;
        self.stderr.borrow_mut().flush()?;
        Ok(())
    }
}

impl Default for Streams {
    fn default() -> Self {
        Self::stdio()
    }
}

/// Lossy UTF-8 view of a captured buffer.
pub fn buffer_text(buffer: &OutputBuffer) -> String {
    String::from_utf8_lossy(&buffer.borrow()).into_owned()
}

/// 程序 trait
///
/// A program receives its arguments without the program name. A non-zero
/// return is an ordinary exit status; an `Err` aborts the statement.
pub trait Program {
    fn name(&self) -> &'static str;
    fn run(&self, io: &Streams, interpreter: &mut Interpreter, args: &[String]) -> ShellResult<i32>;
}
