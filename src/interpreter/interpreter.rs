//! Interpreter - AST Execution Engine
//!
//! Walks a [`ScriptNode`] statement by statement. Each call runs in a fresh
//! environment scope: prefix assignments are set first, then the argument
//! words are expanded (seeing those assignments), then the first argument is
//! looked up in the program registry and invoked with the rest. The scope is
//! popped afterwards whatever the outcome, so neither the assignments nor
//! anything the call wrote survive it.
//!
//! Delegates to specialized modules for:
//! - Word expansion (word_expansion.rs, expansion/)
//! - Arithmetic evaluation (arithmetic.rs)
//! - Trace rendering (stringify.rs, helpers/xtrace.rs)

use crate::ast::types::{CallNode, CommandNode, ScriptNode, StatementNode, WordNode, ArithExpr};
use crate::commands::{ProgramRegistry, Streams};
use crate::interpreter::arithmetic::evaluate_arithmetic;
use crate::interpreter::environment::Environment;
use crate::interpreter::errors::{ShellError, ShellResult};
use crate::interpreter::helpers::xtrace::get_xtrace_prefix;
use crate::interpreter::stringify::stringify_statement;
use crate::interpreter::types::{InterpreterOptions, ScriptResult};
use crate::interpreter::word_expansion::expand_word;

/// Prefix for error lines written to the script's stderr
pub const ERROR_PREFIX: &str = "walk-sh";

pub struct Interpreter {
    env: Environment,
    programs: ProgramRegistry,
    options: InterpreterOptions,
    streams: Streams,
}

impl Interpreter {
    /// Interpreter over an empty environment, default options and real stdio.
    pub fn new(programs: ProgramRegistry) -> Self {
        Self {
            env: Environment::new(),
            programs,
            options: InterpreterOptions::default(),
            streams: Streams::stdio(),
        }
    }

    pub fn with_options(mut self, options: InterpreterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_streams(mut self, streams: Streams) -> Self {
        self.streams = streams;
        self
    }

    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn options(&self) -> &InterpreterOptions {
        &self.options
    }

    pub fn streams(&self) -> &Streams {
        &self.streams
    }

    /// Swap in new streams, returning the old ones.
    pub(crate) fn replace_streams(&mut self, streams: Streams) -> Streams {
        std::mem::replace(&mut self.streams, streams)
    }

    pub fn expand_word(&mut self, word: &WordNode) -> ShellResult<String> {
        expand_word(self, word)
    }

    pub fn evaluate_arithmetic(&mut self, expr: &ArithExpr) -> ShellResult<String> {
        evaluate_arithmetic(self, expr)
    }

    // =========================================================================
    // Script driver
    // =========================================================================

    /// Run every statement in order.
    ///
    /// A statement that fails with an error is reported on stderr and counts
    /// as status -1. The result carries the last executed statement's status
    /// and error. With `exit_on_error` the run stops at the first non-zero
    /// status.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = script.statements.len()))]
    pub fn run(&mut self, script: &ScriptNode) -> ScriptResult {
        let mut result = ScriptResult::default();

        for statement in &script.statements {
            result = match self.trace_and_execute(statement) {
                Ok(status) => ScriptResult::status(status),
                Err(error) => {
                    self.report_error(&error);
                    ScriptResult::failed(error)
                }
            };

            if self.options.exit_on_error && result.exit_code != 0 {
                tracing::debug!(exit_code = result.exit_code, "errexit: stopping script");
                break;
            }
        }

        if let Err(error) = self.streams.flush() {
            tracing::warn!(%error, "failed to flush output streams");
        }
        result
    }

    fn trace_and_execute(&mut self, statement: &StatementNode) -> ShellResult<i32> {
        if self.options.print_executed {
            let line = format!("{}{}\n", get_xtrace_prefix(&self.env), stringify_statement(statement));
            self.streams.write_stdout(&line)?;
        }
        self.execute_statement(statement)
    }

    fn report_error(&self, error: &ShellError) {
        tracing::debug!(%error, "statement failed");
        let line = format!("{}: {}\n", ERROR_PREFIX, error);
        if let Err(write_error) = self.streams.write_stderr(&line) {
            tracing::warn!(error = %write_error, "could not report statement error");
        }
    }

    // =========================================================================
    // Statements and commands
    // =========================================================================

    /// Execute one statement and return its exit status.
    pub fn execute_statement(&mut self, statement: &StatementNode) -> ShellResult<i32> {
        let Some(command) = &statement.command else {
            return Ok(0);
        };

        if statement.background || statement.coprocess {
            tracing::warn!(
                command = command.kind_name(),
                background = statement.background,
                coprocess = statement.coprocess,
                "asynchronous statement skipped"
            );
            return Ok(0);
        }

        if !statement.redirections.is_empty() {
            return Err(ShellError::unsupported("redirection"));
        }

        let status = self.execute_command(command)?;
        Ok(if statement.negated { negate_status(status) } else { status })
    }

    fn execute_command(&mut self, command: &CommandNode) -> ShellResult<i32> {
        match command {
            CommandNode::Call(call) => self.execute_call(call),
            CommandNode::Arithmetic(_)
            | CommandNode::Binary(_)
            | CommandNode::Block(_)
            | CommandNode::Case(_)
            | CommandNode::Coproc(_)
            | CommandNode::Declare(_)
            | CommandNode::For(_)
            | CommandNode::Function(_)
            | CommandNode::If(_)
            | CommandNode::Let(_)
            | CommandNode::Subshell(_)
            | CommandNode::Test(_)
            | CommandNode::Time(_)
            | CommandNode::While(_) => Err(ShellError::unsupported(command.kind_name())),
        }
    }

    fn execute_call(&mut self, call: &CallNode) -> ShellResult<i32> {
        let guard = self.env.push_scope();
        let result = self.run_call(call);
        self.env.pop_scope(guard);
        result
    }

    fn run_call(&mut self, call: &CallNode) -> ShellResult<i32> {
        for assignment in &call.assignments {
            let value = self.expand_word(&assignment.value)?;
            self.env.set(assignment.name.as_str(), value);
        }

        let mut args = Vec::with_capacity(call.args.len());
        for word in &call.args {
            args.push(self.expand_word(word)?);
        }

        let Some((name, rest)) = args.split_first() else {
            return Err(ShellError::InvalidCommand);
        };
        let program = self
            .programs
            .get(name)
            .ok_or_else(|| ShellError::CommandNotFound { name: name.clone() })?;

        tracing::debug!(program = %name, args = ?rest, "invoking program");
        let io = self.streams.clone();
        program.run(&io, self, rest)
    }
}

/// `!`: zero becomes one, anything else becomes zero.
fn negate_status(status: i32) -> i32 {
    if status == 0 { 1 } else { 0 }
}
