//! xtrace (set -x) helper functions
//!
//! PS4 variable controls the prefix of each trace line (default "+ ").
//! PS4 is used literally; it is not expanded.

use crate::interpreter::environment::Environment;

/// Default PS4 value when not set
pub const DEFAULT_PS4: &str = "+ ";

/// Get the xtrace prefix from PS4 variable.
/// An unset PS4 gives the default; a PS4 set to "" gives no prefix.
pub fn get_xtrace_prefix(env: &Environment) -> String {
    env.get_raw("PS4").unwrap_or(DEFAULT_PS4).to_string()
}
