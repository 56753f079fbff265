//! Parameter Operation Handlers
//!
//! Handles the parameter expansion forms:
//! - $VAR / ${VAR}
//! - Length ${#VAR}, Indirection ${!VAR}
//! - Substring ${VAR:offset:length}
//! - Replacement ${VAR/pattern/rep}, ${VAR//pattern/rep}
//! - DefaultValue ${VAR:-w}, UseAlternative ${VAR:+w}
//! - CaseModification ${VAR^}, ${VAR^^}, ${VAR,}, ${VAR,,}
//!
//! Patterns are matched literally; there is no glob matching.

use crate::ast::types::{CaseDirection, ParameterExpansionPart, ParameterOperation};
use crate::interpreter::arithmetic::parse_number;
use crate::interpreter::errors::{ShellError, ShellResult};
use crate::interpreter::types::SliceMode;
use crate::interpreter::{Environment, Interpreter};

/// Expand `${parameter<operation>}` against the interpreter's environment.
pub fn expand_parameter(interp: &mut Interpreter, part: &ParameterExpansionPart) -> ShellResult<String> {
    let name = part.parameter.as_str();
    let Some(operation) = &part.operation else {
        return Ok(interp.env().get(name));
    };

    match operation {
        ParameterOperation::Length => Ok(interp.env().get(name).chars().count().to_string()),

        ParameterOperation::Indirect => {
            let target = interp
                .env()
                .get_raw(name)
                .ok_or_else(|| ShellError::InvalidIndirectExpansion { name: name.to_string() })?;
            Ok(interp.env().get(target))
        }

        ParameterOperation::Slice { offset, length } => {
            // Value is read before the bounds are evaluated; they may have side effects
            let value = interp.env().get(name);
            let offset = parse_number(&interp.evaluate_arithmetic(offset)?)?;
            let length = match length {
                Some(length) => Some(parse_number(&interp.evaluate_arithmetic(length)?)?),
                None => None,
            };
            apply_substring_op(&value, offset, length, interp.options().slice_mode)
        }

        ParameterOperation::Replace { pattern, replacement, all } => {
            let value = interp.env().get(name);
            let pattern = interp.expand_word(pattern)?;
            let replacement = interp.expand_word(replacement)?;
            Ok(apply_pattern_replacement_op(&value, &pattern, &replacement, *all))
        }

        ParameterOperation::Default { word, check_empty } => {
            if should_use_default(interp.env(), name, *check_empty) {
                interp.expand_word(word)
            } else {
                Ok(interp.env().get(name))
            }
        }

        ParameterOperation::Alternate { word, check_empty } => {
            if should_use_alternative(interp.env(), name, *check_empty) {
                interp.expand_word(word)
            } else {
                Ok(String::new())
            }
        }

        ParameterOperation::CaseModification { direction, all } => {
            Ok(apply_case_modification(&interp.env().get(name), *direction, *all))
        }

        ParameterOperation::Width => Err(ShellError::unsupported("width expansion")),
        ParameterOperation::Index { .. } => Err(ShellError::unsupported("indexed expansion")),
    }
}

/// Check if default value should be used.
/// Returns true if the variable is unset, or if check_empty is true and the variable is empty.
pub fn should_use_default(env: &Environment, name: &str, check_empty: bool) -> bool {
    match env.get_raw(name) {
        None => true,
        Some(value) => check_empty && value.is_empty(),
    }
}

/// Check if alternative value should be used.
/// Returns true if the variable is set (and non-empty if check_empty is true).
pub fn should_use_alternative(env: &Environment, name: &str, check_empty: bool) -> bool {
    !should_use_default(env, name, check_empty)
}

/// Replace the first (or every) literal occurrence of `pattern`.
/// An empty pattern matches before every character and at the end.
pub fn apply_pattern_replacement_op(value: &str, pattern: &str, replacement: &str, replace_all: bool) -> String {
    if replace_all {
        value.replace(pattern, replacement)
    } else {
        value.replacen(pattern, replacement, 1)
    }
}

/// Apply substring extraction to a value, counting characters.
///
/// In [`SliceMode::EndIndex`] the second bound is an end index and both
/// bounds must satisfy `0 <= offset <= end <= len`. In [`SliceMode::Count`]
/// the second bound is a character count. A negative offset counts from the
/// end, and one reaching before the start gives "". A negative count stops
/// that many characters before the end. A count past the end is clamped.
pub fn apply_substring_op(value: &str, offset: i64, length: Option<i64>, mode: SliceMode) -> ShellResult<String> {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len() as i64;
    let out_of_range = || ShellError::SliceOutOfRange {
        offset,
        length: length.unwrap_or(len),
        len: chars.len(),
    };

    let (start, end) = match mode {
        SliceMode::EndIndex => {
            let end = length.unwrap_or(len);
            if offset < 0 || offset > end || end > len {
                return Err(out_of_range());
            }
            (offset, end)
        }
        SliceMode::Count => {
            let start = if offset < 0 { len + offset } else { offset };
            if start < 0 || start >= len {
                return Ok(String::new());
            }
            let end = match length {
                Some(l) if l < 0 => {
                    let computed = len + l;
                    if computed < start {
                        return Err(out_of_range());
                    }
                    computed
                }
                Some(l) => start.saturating_add(l).min(len),
                None => len,
            };
            (start, end)
        }
    };

    Ok(chars[start as usize..end as usize].iter().collect())
}

/// Upper- or lower-case the first character, or every character when `all`.
pub fn apply_case_modification(value: &str, direction: CaseDirection, all: bool) -> String {
    let convert = |s: &str| match direction {
        CaseDirection::Upper => s.to_uppercase(),
        CaseDirection::Lower => s.to_lowercase(),
    };
    if all {
        return convert(value);
    }
    match value.chars().next() {
        None => String::new(),
        Some(first) => {
            let rest = &value[first.len_utf8()..];
            convert(&value[..first.len_utf8()]) + rest
        }
    }
}
