//! Abstract Syntax Tree (AST) Types for the shell engine
//!
//! This module defines the statement, word and arithmetic tree the
//! interpreter walks. Parsing happens elsewhere; the tree arrives already
//! validated, either built in code through the [`AST`] factory or
//! deserialized from JSON.
//!
//! Every construct a shell script can contain has a variant here, including
//! the ones the interpreter does not execute yet. Matching on these enums is
//! exhaustive, so an unhandled construct is always an explicit decision.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// SCRIPT & STATEMENTS
// =============================================================================

/// Root node: a complete script
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScriptNode {
    pub statements: Vec<StatementNode>,
}

/// A single statement: one command plus its execution flags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatementNode {
    /// Command to run (None for an empty statement)
    #[serde(default)]
    pub command: Option<CommandNode>,
    /// Negate exit status with !
    #[serde(default)]
    pub negated: bool,
    /// Run in background with &
    #[serde(default)]
    pub background: bool,
    /// Run as a coprocess
    #[serde(default)]
    pub coprocess: bool,
    /// I/O redirections
    #[serde(default)]
    pub redirections: Vec<RedirectionNode>,
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Union of all command types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandNode {
    Call(CallNode),
    Arithmetic(ArithmeticCommandNode),
    Binary(BinaryCommandNode),
    Block(BlockNode),
    Case(CaseNode),
    Coproc(CoprocNode),
    Declare(DeclareNode),
    For(ForNode),
    Function(FunctionDeclNode),
    If(IfNode),
    Let(LetNode),
    Subshell(SubshellNode),
    Test(TestNode),
    Time(TimeNode),
    While(WhileNode),
}

impl CommandNode {
    /// Short name of the construct, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            CommandNode::Call(_) => "call",
            CommandNode::Arithmetic(_) => "arithmetic command",
            CommandNode::Binary(_) => "binary command",
            CommandNode::Block(_) => "block",
            CommandNode::Case(_) => "case",
            CommandNode::Coproc(_) => "coproc",
            CommandNode::Declare(_) => "declare",
            CommandNode::For(_) => "for",
            CommandNode::Function(_) => "function",
            CommandNode::If(_) => "if",
            CommandNode::Let(_) => "let",
            CommandNode::Subshell(_) => "subshell",
            CommandNode::Test(_) => "test",
            CommandNode::Time(_) => "time",
            CommandNode::While(_) => "while",
        }
    }
}

/// Simple command: VAR=value name args...
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CallNode {
    /// Variable assignments before command: VAR=value cmd
    #[serde(default)]
    pub assignments: Vec<AssignmentNode>,
    /// Command name followed by its arguments
    #[serde(default)]
    pub args: Vec<WordNode>,
}

/// Arithmetic command: (( expr ))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithmeticCommandNode {
    pub expression: ArithExpr,
}

/// Two statements joined by &&, || or a pipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryCommandNode {
    pub operator: BinaryCommandOperator,
    pub left: Box<StatementNode>,
    pub right: Box<StatementNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryCommandOperator {
    And,     // &&
    Or,      // ||
    Pipe,    // |
    PipeAll, // |&
}

impl fmt::Display for BinaryCommandOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
            Self::Pipe => write!(f, "|"),
            Self::PipeAll => write!(f, "|&"),
        }
    }
}

/// Command group: { ...; }
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    pub statements: Vec<StatementNode>,
}

/// Subshell: ( ... )
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubshellNode {
    pub statements: Vec<StatementNode>,
}

/// case statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseNode {
    pub word: WordNode,
    pub items: Vec<CaseItemNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseItemNode {
    pub patterns: Vec<WordNode>,
    pub body: Vec<StatementNode>,
}

/// coproc [NAME] command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoprocNode {
    #[serde(default)]
    pub name: Option<String>,
    pub body: Box<StatementNode>,
}

/// declare/local/export/readonly with their operands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclareNode {
    pub variant: String,
    #[serde(default)]
    pub args: Vec<WordNode>,
}

/// for VAR in WORDS; do ...; done
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForNode {
    pub variable: String,
    /// Words to iterate over (None = "$@")
    #[serde(default)]
    pub words: Option<Vec<WordNode>>,
    pub body: Vec<StatementNode>,
}

/// name() { ... }
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclNode {
    pub name: String,
    pub body: Box<StatementNode>,
}

/// if/elif/else
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfNode {
    pub condition: Vec<StatementNode>,
    pub then_body: Vec<StatementNode>,
    #[serde(default)]
    pub else_body: Option<Vec<StatementNode>>,
}

/// let expr...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetNode {
    pub expressions: Vec<ArithExpr>,
}

/// Conditional command: [[ ... ]]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestNode {
    pub words: Vec<WordNode>,
}

/// time [-p] statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeNode {
    #[serde(default)]
    pub posix: bool,
    #[serde(default)]
    pub statement: Option<Box<StatementNode>>,
}

/// while/until loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileNode {
    pub condition: Vec<StatementNode>,
    pub body: Vec<StatementNode>,
    /// until loop instead of while
    #[serde(default)]
    pub until: bool,
}

// =============================================================================
// ASSIGNMENTS
// =============================================================================

/// Variable assignment: VAR=value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentNode {
    pub name: String,
    #[serde(default)]
    pub value: WordNode,
}

// =============================================================================
// REDIRECTIONS
// =============================================================================

/// I/O redirection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectionNode {
    /// File descriptor (default depends on operator)
    #[serde(default)]
    pub fd: Option<i32>,
    pub operator: RedirectionOperator,
    pub target: WordNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectionOperator {
    Less,      // <
    Great,     // >
    DGreat,    // >>
    GreatAnd,  // >&
    LessAnd,   // <&
    LessGreat, // <>
    Clobber,   // >|
    AndGreat,  // &>
    AndDGreat, // &>>
    TLess,     // <<<
    DLess,     // <<
    DLessDash, // <<-
}

impl fmt::Display for RedirectionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Less => write!(f, "<"),
            Self::Great => write!(f, ">"),
            Self::DGreat => write!(f, ">>"),
            Self::GreatAnd => write!(f, ">&"),
            Self::LessAnd => write!(f, "<&"),
            Self::LessGreat => write!(f, "<>"),
            Self::Clobber => write!(f, ">|"),
            Self::AndGreat => write!(f, "&>"),
            Self::AndDGreat => write!(f, "&>>"),
            Self::TLess => write!(f, "<<<"),
            Self::DLess => write!(f, "<<"),
            Self::DLessDash => write!(f, "<<-"),
        }
    }
}

// =============================================================================
// WORDS
// =============================================================================

/// A Word is a sequence of parts that form a single shell word.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WordNode {
    pub parts: Vec<WordPart>,
}

/// Parts that can make up a word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WordPart {
    Literal(LiteralPart),
    SingleQuoted(SingleQuotedPart),
    DoubleQuoted(DoubleQuotedPart),
    ParameterExpansion(ParameterExpansionPart),
    ArithmeticExpansion(ArithmeticExpansionPart),
    CommandSubstitution(CommandSubstitutionPart),
    BraceExpansion(BraceExpansionPart),
    ExtGlob(ExtGlobPart),
    ProcessSubstitution(ProcessSubstitutionPart),
}

/// Literal text (no special meaning)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralPart {
    pub value: String,
}

/// Single-quoted string: 'literal'
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleQuotedPart {
    pub value: String,
}

/// Double-quoted string: "with $expansion"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoubleQuotedPart {
    pub parts: Vec<WordPart>,
}

// =============================================================================
// PARAMETER EXPANSION
// =============================================================================

/// Parameter/variable expansion: $VAR or ${VAR...}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterExpansionPart {
    pub parameter: String,
    /// At most one modifier; None is a plain $VAR
    #[serde(default)]
    pub operation: Option<ParameterOperation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ParameterOperation {
    /// ${#VAR}
    Length,
    /// ${!VAR}
    Indirect,
    /// ${VAR:offset} or ${VAR:offset:length}
    Slice {
        offset: ArithExpr,
        #[serde(default)]
        length: Option<ArithExpr>,
    },
    /// ${VAR/pattern/replacement} or ${VAR//pattern/replacement}
    Replace {
        pattern: WordNode,
        #[serde(default)]
        replacement: WordNode,
        #[serde(default)]
        all: bool,
    },
    /// ${VAR:-default} or ${VAR-default}
    Default {
        word: WordNode,
        #[serde(default)]
        check_empty: bool,
    },
    /// ${VAR:+alternative} or ${VAR+alternative}
    Alternate {
        word: WordNode,
        #[serde(default)]
        check_empty: bool,
    },
    /// ${VAR^}, ${VAR^^}, ${VAR,}, ${VAR,,}
    CaseModification {
        direction: CaseDirection,
        #[serde(default)]
        all: bool,
    },
    /// ${%VAR}
    Width,
    /// ${VAR[index]}
    Index { index: ArithExpr },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseDirection {
    Upper,
    Lower,
}

// =============================================================================
// SUBSTITUTIONS
// =============================================================================

/// Arithmetic expansion: $((expr))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithmeticExpansionPart {
    pub expression: ArithExpr,
}

/// Command substitution: $(cmd)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSubstitutionPart {
    pub body: ScriptNode,
}

/// Brace expansion: {a,b,c}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BraceExpansionPart {
    pub items: Vec<WordNode>,
}

/// Extended glob: @(pat), *(pat), +(pat), ?(pat), !(pat)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtGlobPart {
    pub operator: char,
    pub pattern: String,
}

/// Process substitution: <(cmd) or >(cmd)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSubstitutionPart {
    pub body: ScriptNode,
    pub direction: ProcessDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessDirection {
    Input,  // <(...)
    Output, // >(...)
}

// =============================================================================
// ARITHMETIC
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArithExpr {
    /// Operand: expands to an integer literal or the name of a variable
    Word { word: WordNode },
    /// ( expr )
    Paren { expression: Box<ArithExpr> },
    Unary {
        operator: ArithUnaryOperator,
        operand: Box<ArithExpr>,
        /// x++ rather than ++x
        #[serde(default)]
        postfix: bool,
    },
    Binary {
        operator: ArithBinaryOperator,
        left: Box<ArithExpr>,
        right: Box<ArithExpr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithUnaryOperator {
    Neg,
    Pos,
    Not,
    BitNot,
    Inc,
    Dec,
}

impl fmt::Display for ArithUnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neg => write!(f, "-"),
            Self::Pos => write!(f, "+"),
            Self::Not => write!(f, "!"),
            Self::BitNot => write!(f, "~"),
            Self::Inc => write!(f, "++"),
            Self::Dec => write!(f, "--"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithBinaryOperator {
    Add, Sub, Mul, Div, Mod, Pow,
    LShift, RShift,
    Lt, Le, Gt, Ge, Eq, Ne,
    BitAnd, BitOr, BitXor,
    LogAnd, LogOr,
    Comma,
}

impl fmt::Display for ArithBinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::LShift => "<<",
            Self::RShift => ">>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::LogAnd => "&&",
            Self::LogOr => "||",
            Self::Comma => ",",
        };
        write!(f, "{}", op)
    }
}

// =============================================================================
// FACTORY FUNCTIONS (AST builders)
// =============================================================================

/// AST factory for building nodes
pub struct AST;

impl AST {
    pub fn script(statements: Vec<StatementNode>) -> ScriptNode {
        ScriptNode { statements }
    }

    pub fn statement(command: CommandNode) -> StatementNode {
        StatementNode {
            command: Some(command),
            ..Default::default()
        }
    }

    pub fn negated(command: CommandNode) -> StatementNode {
        StatementNode {
            command: Some(command),
            negated: true,
            ..Default::default()
        }
    }

    pub fn call(args: Vec<WordNode>) -> CommandNode {
        CommandNode::Call(CallNode { assignments: Vec::new(), args })
    }

    pub fn call_with_assignments(
        assignments: Vec<AssignmentNode>,
        args: Vec<WordNode>,
    ) -> CommandNode {
        CommandNode::Call(CallNode { assignments, args })
    }

    /// A call whose arguments are all plain literal words.
    pub fn simple_call(args: &[&str]) -> CommandNode {
        Self::call(args.iter().map(|a| Self::literal_word(*a)).collect())
    }

    pub fn assignment(name: impl Into<String>, value: WordNode) -> AssignmentNode {
        AssignmentNode { name: name.into(), value }
    }

    pub fn word(parts: Vec<WordPart>) -> WordNode {
        WordNode { parts }
    }

    pub fn literal_word(value: impl Into<String>) -> WordNode {
        Self::word(vec![Self::literal(value)])
    }

    pub fn literal(value: impl Into<String>) -> WordPart {
        WordPart::Literal(LiteralPart { value: value.into() })
    }

    pub fn single_quoted(value: impl Into<String>) -> WordPart {
        WordPart::SingleQuoted(SingleQuotedPart { value: value.into() })
    }

    pub fn double_quoted(parts: Vec<WordPart>) -> WordPart {
        WordPart::DoubleQuoted(DoubleQuotedPart { parts })
    }

    pub fn parameter(parameter: impl Into<String>) -> WordPart {
        Self::parameter_expansion(parameter, None)
    }

    pub fn parameter_expansion(
        parameter: impl Into<String>,
        operation: Option<ParameterOperation>,
    ) -> WordPart {
        WordPart::ParameterExpansion(ParameterExpansionPart {
            parameter: parameter.into(),
            operation,
        })
    }

    pub fn arithmetic_expansion(expression: ArithExpr) -> WordPart {
        WordPart::ArithmeticExpansion(ArithmeticExpansionPart { expression })
    }

    pub fn command_substitution(body: ScriptNode) -> WordPart {
        WordPart::CommandSubstitution(CommandSubstitutionPart { body })
    }

    pub fn arith_word(value: impl Into<String>) -> ArithExpr {
        ArithExpr::Word { word: Self::literal_word(value) }
    }

    pub fn arith_paren(expression: ArithExpr) -> ArithExpr {
        ArithExpr::Paren { expression: Box::new(expression) }
    }

    pub fn arith_unary(operator: ArithUnaryOperator, operand: ArithExpr, postfix: bool) -> ArithExpr {
        ArithExpr::Unary {
            operator,
            operand: Box::new(operand),
            postfix,
        }
    }

    pub fn arith_binary(operator: ArithBinaryOperator, left: ArithExpr, right: ArithExpr) -> ArithExpr {
        ArithExpr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn redirection(
        operator: RedirectionOperator,
        target: WordNode,
        fd: Option<i32>,
    ) -> RedirectionNode {
        RedirectionNode { fd, operator, target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_from_json() {
        let json = r#"{
            "statements": [{
                "command": {
                    "type": "call",
                    "assignments": [
                        {"name": "x", "value": {"parts": [{"type": "literal", "value": "2"}]}}
                    ],
                    "args": [
                        {"parts": [{"type": "literal", "value": "echo"}]},
                        {"parts": [{"type": "parameter_expansion", "parameter": "x", "operation": {"op": "length"}}]}
                    ]
                },
                "negated": true
            }]
        }"#;
        let script: ScriptNode = serde_json::from_str(json).unwrap();
        assert_eq!(script.statements.len(), 1);
        let stmt = &script.statements[0];
        assert!(stmt.negated);
        assert!(!stmt.background);
        assert!(stmt.redirections.is_empty());
        let expected = AST::call_with_assignments(
            vec![AST::assignment("x", AST::literal_word("2"))],
            vec![
                AST::literal_word("echo"),
                AST::word(vec![AST::parameter_expansion("x", Some(ParameterOperation::Length))]),
            ],
        );
        assert_eq!(stmt.command.as_ref(), Some(&expected));
    }

    #[test]
    fn test_arithmetic_from_json() {
        let json = r#"{
            "type": "unary",
            "operator": "inc",
            "postfix": true,
            "operand": {"type": "word", "word": {"parts": [{"type": "literal", "value": "x"}]}}
        }"#;
        let expr: ArithExpr = serde_json::from_str(json).unwrap();
        assert_eq!(expr, AST::arith_unary(ArithUnaryOperator::Inc, AST::arith_word("x"), true));
    }

    #[test]
    fn test_empty_statement_defaults() {
        let stmt: StatementNode = serde_json::from_str("{}").unwrap();
        assert!(stmt.command.is_none());
        assert!(!stmt.negated);
        assert!(!stmt.coprocess);
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(AST::simple_call(&["true"]).kind_name(), "call");
        let block = CommandNode::Block(BlockNode { statements: vec![] });
        assert_eq!(block.kind_name(), "block");
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(RedirectionOperator::DGreat.to_string(), ">>");
        assert_eq!(ArithBinaryOperator::Pow.to_string(), "**");
        assert_eq!(ArithUnaryOperator::BitNot.to_string(), "~");
        assert_eq!(BinaryCommandOperator::Or.to_string(), "||");
    }
}
