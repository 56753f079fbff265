//! Arithmetic Evaluation
//!
//! Evaluates arithmetic trees with 64-bit signed integers:
//! - Unary operators (-, +, !, ~)
//! - Pre/post increment/decrement (++, --), which write back to the variable
//! - Binary operators (+, -, *, /, %, **, <<, >>, comparisons, &, |, ^, &&, ||, ,)
//!
//! A leaf word is expanded first. If the result is an identifier it names a
//! variable (unset or empty reads as 0); otherwise it must be a base-10
//! integer literal. Overflow wraps.

use crate::ast::types::*;
use crate::interpreter::errors::{ShellError, ShellResult};
use crate::interpreter::stringify::stringify_arith;
use crate::interpreter::{Environment, Interpreter};

/// Evaluate `expr` to the decimal string of its value.
pub fn evaluate_arithmetic(interp: &mut Interpreter, expr: &ArithExpr) -> ShellResult<String> {
    Ok(evaluate(interp, expr)?.to_string())
}

fn evaluate(interp: &mut Interpreter, expr: &ArithExpr) -> ShellResult<i64> {
    match expr {
        ArithExpr::Word { word } => {
            let text = interp.expand_word(word)?;
            Ok(resolve_operand(interp.env(), &text)?.value())
        }

        ArithExpr::Paren { expression } => evaluate(interp, expression),

        ArithExpr::Unary { operator, operand, postfix } => match operator {
            ArithUnaryOperator::Inc | ArithUnaryOperator::Dec => {
                handle_inc_dec(interp, operand, *operator, !*postfix)
            }
            _ => Ok(apply_unary_op(evaluate(interp, operand)?, *operator)),
        },

        ArithExpr::Binary { operator, left, right } => {
            let left = evaluate(interp, left)?;
            // Short-circuit: the right side is not evaluated, so its side effects don't happen
            match operator {
                ArithBinaryOperator::LogAnd if left == 0 => return Ok(0),
                ArithBinaryOperator::LogOr if left != 0 => return Ok(1),
                _ => {}
            }
            let right = evaluate(interp, right)?;
            apply_binary_op(left, right, *operator)
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

/// Pure binary operator evaluation - no side effects.
fn apply_binary_op(left: i64, right: i64, operator: ArithBinaryOperator) -> ShellResult<i64> {
    let flag = |b: bool| if b { 1 } else { 0 };
    match operator {
        ArithBinaryOperator::Add => Ok(left.wrapping_add(right)),
        ArithBinaryOperator::Sub => Ok(left.wrapping_sub(right)),
        ArithBinaryOperator::Mul => Ok(left.wrapping_mul(right)),
        ArithBinaryOperator::Div => {
            if right == 0 {
                Err(ShellError::DivisionByZero)
            } else {
                Ok(left.wrapping_div(right))
            }
        }
        ArithBinaryOperator::Mod => {
            if right == 0 {
                Err(ShellError::DivisionByZero)
            } else {
                Ok(left.wrapping_rem(right))
            }
        }
        ArithBinaryOperator::Pow => {
            if right < 0 {
                Err(ShellError::NegativeExponent)
            } else {
                let exponent = u32::try_from(right).unwrap_or(u32::MAX);
                Ok(left.wrapping_pow(exponent))
            }
        }
        // Shift counts are taken modulo 64
        ArithBinaryOperator::LShift => Ok(left.wrapping_shl(right as u32)),
        ArithBinaryOperator::RShift => Ok(left.wrapping_shr(right as u32)),
        ArithBinaryOperator::Lt => Ok(flag(left < right)),
        ArithBinaryOperator::Le => Ok(flag(left <= right)),
        ArithBinaryOperator::Gt => Ok(flag(left > right)),
        ArithBinaryOperator::Ge => Ok(flag(left >= right)),
        ArithBinaryOperator::Eq => Ok(flag(left == right)),
        ArithBinaryOperator::Ne => Ok(flag(left != right)),
        ArithBinaryOperator::BitAnd => Ok(left & right),
        ArithBinaryOperator::BitOr => Ok(left | right),
        ArithBinaryOperator::BitXor => Ok(left ^ right),
        ArithBinaryOperator::LogAnd => Ok(flag(left != 0 && right != 0)),
        ArithBinaryOperator::LogOr => Ok(flag(left != 0 || right != 0)),
        ArithBinaryOperator::Comma => Ok(right),
    }
}

/// Pure unary operator evaluation. ++/-- are handled by [`handle_inc_dec`].
fn apply_unary_op(operand: i64, operator: ArithUnaryOperator) -> i64 {
    match operator {
        ArithUnaryOperator::Neg => operand.wrapping_neg(),
        ArithUnaryOperator::Pos => operand,
        ArithUnaryOperator::Not => if operand == 0 { 1 } else { 0 },
        ArithUnaryOperator::BitNot => !operand,
        ArithUnaryOperator::Inc => operand.wrapping_add(1),
        ArithUnaryOperator::Dec => operand.wrapping_sub(1),
    }
}

/// Handle increment/decrement operators with side effects.
fn handle_inc_dec(
    interp: &mut Interpreter,
    operand: &ArithExpr,
    operator: ArithUnaryOperator,
    prefix: bool,
) -> ShellResult<i64> {
    let ArithExpr::Word { word } = operand else {
        return Err(ShellError::NotAVariable {
            operand: stringify_arith(operand),
        });
    };

    let text = interp.expand_word(word)?;
    match resolve_operand(interp.env(), &text)? {
        Operand::Variable { name, value } => {
            let new_value = apply_unary_op(value, operator);
            interp.env_mut().set(name, new_value.to_string());
            Ok(if prefix { new_value } else { value })
        }
        Operand::Literal(_) => Err(ShellError::NotAVariable { operand: text }),
    }
}

// ============================================================================
// Operands
// ============================================================================

enum Operand {
    Variable { name: String, value: i64 },
    Literal(i64),
}

impl Operand {
    fn value(&self) -> i64 {
        match self {
            Operand::Variable { value, .. } => *value,
            Operand::Literal(value) => *value,
        }
    }
}

fn resolve_operand(env: &Environment, text: &str) -> ShellResult<Operand> {
    let text = text.trim();
    if is_valid_identifier(text) {
        let value = match env.get_raw(text).map(str::trim) {
            None | Some("") => 0,
            Some(raw) => parse_number(raw)?,
        };
        return Ok(Operand::Variable {
            name: text.to_string(),
            value,
        });
    }
    Ok(Operand::Literal(parse_number(text)?))
}

/// Parse a base-10 integer, as used for operands and slice bounds.
pub(crate) fn parse_number(text: &str) -> ShellResult<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| ShellError::parse_operand(text))
}

/// Check if a variable name is a valid identifier.
pub(crate) fn is_valid_identifier(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let bytes = name.as_bytes();
    let first = bytes[0];
    if !matches!(first, b'a'..=b'z' | b'A'..=b'Z' | b'_') {
        return false;
    }
    bytes[1..].iter().all(|&b| matches!(b, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_'))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ProgramRegistry;

    fn interp_with(vars: &[(&str, &str)]) -> Interpreter {
        Interpreter::new(ProgramRegistry::new()).with_env(vars.iter().copied().collect())
    }

    fn eval(interp: &mut Interpreter, expr: &ArithExpr) -> ShellResult<String> {
        evaluate_arithmetic(interp, expr)
    }

    fn binary(op: ArithBinaryOperator, left: &str, right: &str) -> ArithExpr {
        AST::arith_binary(op, AST::arith_word(left), AST::arith_word(right))
    }

    #[test]
    fn test_apply_binary_op() {
        assert_eq!(apply_binary_op(5, 3, ArithBinaryOperator::Add).unwrap(), 8);
        assert_eq!(apply_binary_op(5, 3, ArithBinaryOperator::Sub).unwrap(), 2);
        assert_eq!(apply_binary_op(5, 3, ArithBinaryOperator::Mul).unwrap(), 15);
        assert_eq!(apply_binary_op(7, 2, ArithBinaryOperator::Div).unwrap(), 3);
        assert_eq!(apply_binary_op(-7, 2, ArithBinaryOperator::Mod).unwrap(), -1);
        assert_eq!(apply_binary_op(2, 10, ArithBinaryOperator::Pow).unwrap(), 1024);
        assert_eq!(apply_binary_op(5, 3, ArithBinaryOperator::Lt).unwrap(), 0);
        assert_eq!(apply_binary_op(3, 5, ArithBinaryOperator::Lt).unwrap(), 1);
        assert_eq!(apply_binary_op(5, 5, ArithBinaryOperator::Eq).unwrap(), 1);
        assert_eq!(apply_binary_op(1, 9, ArithBinaryOperator::Comma).unwrap(), 9);
    }

    #[test]
    fn test_apply_binary_op_errors() {
        assert!(matches!(
            apply_binary_op(5, 0, ArithBinaryOperator::Div),
            Err(ShellError::DivisionByZero)
        ));
        assert!(matches!(
            apply_binary_op(5, 0, ArithBinaryOperator::Mod),
            Err(ShellError::DivisionByZero)
        ));
        assert!(matches!(
            apply_binary_op(2, -1, ArithBinaryOperator::Pow),
            Err(ShellError::NegativeExponent)
        ));
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(apply_binary_op(i64::MAX, 1, ArithBinaryOperator::Add).unwrap(), i64::MIN);
        assert_eq!(apply_binary_op(i64::MIN, -1, ArithBinaryOperator::Div).unwrap(), i64::MIN);
        assert_eq!(apply_unary_op(i64::MIN, ArithUnaryOperator::Neg), i64::MIN);
    }

    #[test]
    fn test_bitwise_ops() {
        assert_eq!(apply_binary_op(0b1010, 0b1100, ArithBinaryOperator::BitAnd).unwrap(), 0b1000);
        assert_eq!(apply_binary_op(0b1010, 0b1100, ArithBinaryOperator::BitOr).unwrap(), 0b1110);
        assert_eq!(apply_binary_op(0b1010, 0b1100, ArithBinaryOperator::BitXor).unwrap(), 0b0110);
        assert_eq!(apply_binary_op(5, 2, ArithBinaryOperator::LShift).unwrap(), 20);
        assert_eq!(apply_binary_op(20, 2, ArithBinaryOperator::RShift).unwrap(), 5);
    }

    #[test]
    fn test_apply_unary_op() {
        assert_eq!(apply_unary_op(5, ArithUnaryOperator::Neg), -5);
        assert_eq!(apply_unary_op(5, ArithUnaryOperator::Pos), 5);
        assert_eq!(apply_unary_op(0, ArithUnaryOperator::Not), 1);
        assert_eq!(apply_unary_op(5, ArithUnaryOperator::Not), 0);
        assert_eq!(apply_unary_op(5, ArithUnaryOperator::BitNot), -6);
    }

    #[test]
    fn test_paren_and_literal() {
        let mut interp = interp_with(&[]);
        let expr = AST::arith_paren(AST::arith_word("42"));
        assert_eq!(eval(&mut interp, &expr).unwrap(), "42");
        let expr = AST::arith_unary(ArithUnaryOperator::Neg, AST::arith_word("7"), false);
        assert_eq!(eval(&mut interp, &expr).unwrap(), "-7");
    }

    #[test]
    fn test_variable_operand() {
        let mut interp = interp_with(&[("x", "5"), ("empty", "")]);
        assert_eq!(eval(&mut interp, &binary(ArithBinaryOperator::Mul, "x", "3")).unwrap(), "15");
        assert_eq!(eval(&mut interp, &AST::arith_word("empty")).unwrap(), "0");
        assert_eq!(eval(&mut interp, &AST::arith_word("unset")).unwrap(), "0");
    }

    #[test]
    fn test_expanded_operand() {
        let mut interp = interp_with(&[("x", "5")]);
        let operand = ArithExpr::Word {
            word: AST::word(vec![AST::parameter("x")]),
        };
        let expr = AST::arith_binary(ArithBinaryOperator::Add, operand, AST::arith_word("1"));
        assert_eq!(eval(&mut interp, &expr).unwrap(), "6");
    }

    #[test]
    fn test_non_numeric_operand() {
        let mut interp = interp_with(&[("x", "abc")]);
        assert!(matches!(
            eval(&mut interp, &AST::arith_word("12abc")),
            Err(ShellError::ParseOperand { operand }) if operand == "12abc"
        ));
        assert!(matches!(
            eval(&mut interp, &AST::arith_word("x")),
            Err(ShellError::ParseOperand { operand }) if operand == "abc"
        ));
    }

    #[test]
    fn test_post_increment() {
        let mut interp = interp_with(&[("x", "5")]);
        let expr = AST::arith_unary(ArithUnaryOperator::Inc, AST::arith_word("x"), true);
        assert_eq!(eval(&mut interp, &expr).unwrap(), "5");
        assert_eq!(interp.env().get("x"), "6");
    }

    #[test]
    fn test_pre_increment() {
        let mut interp = interp_with(&[("x", "5")]);
        let expr = AST::arith_unary(ArithUnaryOperator::Inc, AST::arith_word("x"), false);
        assert_eq!(eval(&mut interp, &expr).unwrap(), "6");
        assert_eq!(interp.env().get("x"), "6");
    }

    #[test]
    fn test_decrement() {
        let mut interp = interp_with(&[("n", "1")]);
        let post = AST::arith_unary(ArithUnaryOperator::Dec, AST::arith_word("n"), true);
        assert_eq!(eval(&mut interp, &post).unwrap(), "1");
        let pre = AST::arith_unary(ArithUnaryOperator::Dec, AST::arith_word("n"), false);
        assert_eq!(eval(&mut interp, &pre).unwrap(), "-1");
        assert_eq!(interp.env().get("n"), "-1");
    }

    #[test]
    fn test_increment_unset_starts_at_zero() {
        let mut interp = interp_with(&[]);
        let expr = AST::arith_unary(ArithUnaryOperator::Inc, AST::arith_word("fresh"), false);
        assert_eq!(eval(&mut interp, &expr).unwrap(), "1");
        assert_eq!(interp.env().get("fresh"), "1");
    }

    #[test]
    fn test_increment_literal_is_error() {
        let mut interp = interp_with(&[]);
        let expr = AST::arith_unary(ArithUnaryOperator::Inc, AST::arith_word("3"), true);
        assert!(matches!(
            eval(&mut interp, &expr),
            Err(ShellError::NotAVariable { operand }) if operand == "3"
        ));

        let nested = AST::arith_unary(ArithUnaryOperator::Inc, AST::arith_paren(AST::arith_word("x")), false);
        assert!(matches!(eval(&mut interp, &nested), Err(ShellError::NotAVariable { .. })));
    }

    #[test]
    fn test_short_circuit_skips_side_effects() {
        let mut interp = interp_with(&[("x", "0")]);
        let bump = AST::arith_unary(ArithUnaryOperator::Inc, AST::arith_word("x"), false);

        let and = AST::arith_binary(ArithBinaryOperator::LogAnd, AST::arith_word("0"), bump.clone());
        assert_eq!(eval(&mut interp, &and).unwrap(), "0");
        let or = AST::arith_binary(ArithBinaryOperator::LogOr, AST::arith_word("2"), bump.clone());
        assert_eq!(eval(&mut interp, &or).unwrap(), "1");
        assert_eq!(interp.env().get("x"), "0");

        let and = AST::arith_binary(ArithBinaryOperator::LogAnd, AST::arith_word("1"), bump);
        assert_eq!(eval(&mut interp, &and).unwrap(), "1");
        assert_eq!(interp.env().get("x"), "1");
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("foo"));
        assert!(is_valid_identifier("_bar"));
        assert!(is_valid_identifier("foo123"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("123foo"));
        assert!(!is_valid_identifier("foo-bar"));
    }
}
