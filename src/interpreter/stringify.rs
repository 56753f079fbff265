//! Debug Stringifier
//!
//! Renders tree nodes back to shell-like text. Used for `print_executed`
//! trace lines and diagnostics; the output is meant to be read, not
//! re-parsed. Command kinds other than calls render as
//! `UNIMPLEMENTED(<kind>)`.

use crate::ast::types::*;

pub fn stringify_statement(statement: &StatementNode) -> String {
    let mut out = String::new();
    if statement.negated {
        out.push_str("! ");
    }
    if let Some(command) = &statement.command {
        out.push_str(&stringify_command(command));
    }
    for redirection in &statement.redirections {
        out.push(' ');
        out.push_str(&stringify_redirection(redirection));
    }
    if statement.coprocess {
        out.insert_str(0, "coproc ");
    }
    if statement.background {
        out.push_str(" &");
    }
    out
}

pub fn stringify_command(command: &CommandNode) -> String {
    match command {
        CommandNode::Call(call) => {
            let assignments = call
                .assignments
                .iter()
                .map(|a| format!("{}={}", a.name, stringify_word(&a.value)));
            let args = call.args.iter().map(stringify_word);
            assignments.chain(args).collect::<Vec<_>>().join(" ")
        }
        other => format!("UNIMPLEMENTED({})", other.kind_name()),
    }
}

pub fn stringify_redirection(redirection: &RedirectionNode) -> String {
    let fd = redirection.fd.map(|fd| fd.to_string()).unwrap_or_default();
    format!("{}{}{}", fd, redirection.operator, stringify_word(&redirection.target))
}

pub fn stringify_word(word: &WordNode) -> String {
    word.parts.iter().map(stringify_word_part).collect()
}

pub fn stringify_word_part(part: &WordPart) -> String {
    match part {
        WordPart::Literal(p) => p.value.clone(),
        WordPart::SingleQuoted(p) => format!("'{}'", p.value),
        WordPart::DoubleQuoted(p) => {
            let inner: String = p.parts.iter().map(stringify_word_part).collect();
            format!("\"{}\"", inner)
        }
        WordPart::ParameterExpansion(p) => stringify_parameter(p),
        WordPart::ArithmeticExpansion(p) => format!("$(({}))", stringify_arith(&p.expression)),
        WordPart::CommandSubstitution(p) => format!("$({})", stringify_statements(&p.body.statements)),
        WordPart::BraceExpansion(p) => {
            let items: Vec<String> = p.items.iter().map(stringify_word).collect();
            format!("{{{}}}", items.join(","))
        }
        WordPart::ExtGlob(p) => format!("{}({})", p.operator, p.pattern),
        WordPart::ProcessSubstitution(p) => {
            let open = match p.direction {
                ProcessDirection::Input => "<(",
                ProcessDirection::Output => ">(",
            };
            format!("{}{})", open, stringify_statements(&p.body.statements))
        }
    }
}

fn stringify_statements(statements: &[StatementNode]) -> String {
    statements.iter().map(stringify_statement).collect::<Vec<_>>().join("; ")
}

pub fn stringify_parameter(part: &ParameterExpansionPart) -> String {
    let name = &part.parameter;
    let Some(operation) = &part.operation else {
        return format!("${}", name);
    };

    let body = match operation {
        ParameterOperation::Length => format!("#{}", name),
        ParameterOperation::Indirect => format!("!{}", name),
        ParameterOperation::Width => format!("%{}", name),
        ParameterOperation::Slice { offset, length } => match length {
            Some(length) => format!("{}:{}:{}", name, stringify_arith(offset), stringify_arith(length)),
            None => format!("{}:{}", name, stringify_arith(offset)),
        },
        ParameterOperation::Replace { pattern, replacement, all } => {
            let slash = if *all { "//" } else { "/" };
            format!("{}{}{}/{}", name, slash, stringify_word(pattern), stringify_word(replacement))
        }
        ParameterOperation::Default { word, check_empty } => {
            let op = if *check_empty { ":-" } else { "-" };
            format!("{}{}{}", name, op, stringify_word(word))
        }
        ParameterOperation::Alternate { word, check_empty } => {
            let op = if *check_empty { ":+" } else { "+" };
            format!("{}{}{}", name, op, stringify_word(word))
        }
        ParameterOperation::CaseModification { direction, all } => {
            let op = match (direction, all) {
                (CaseDirection::Upper, false) => "^",
                (CaseDirection::Upper, true) => "^^",
                (CaseDirection::Lower, false) => ",",
                (CaseDirection::Lower, true) => ",,",
            };
            format!("{}{}", name, op)
        }
        ParameterOperation::Index { index } => format!("{}[{}]", name, stringify_arith(index)),
    };
    format!("${{{}}}", body)
}

pub fn stringify_arith(expr: &ArithExpr) -> String {
    match expr {
        ArithExpr::Word { word } => stringify_word(word),
        ArithExpr::Paren { expression } => format!("({})", stringify_arith(expression)),
        ArithExpr::Unary { operator, operand, postfix } => {
            if *postfix {
                format!("{}{}", stringify_arith(operand), operator)
            } else {
                format!("{}{}", operator, stringify_arith(operand))
            }
        }
        ArithExpr::Binary { operator: ArithBinaryOperator::Comma, left, right } => {
            format!("{}, {}", stringify_arith(left), stringify_arith(right))
        }
        ArithExpr::Binary { operator, left, right } => {
            format!("{} {} {}", stringify_arith(left), operator, stringify_arith(right))
        }
    }
}
