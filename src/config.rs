//! Configuration
//!
//! Interpreter options and an initial environment, read from a TOML file:
//!
//! ```toml
//! [options]
//! exit_on_error = true
//! print_executed = false
//! slice_mode = "count"
//!
//! [env]
//! HOME = "/home/user"
//! PS4 = "> "
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commands::ProgramRegistry;
use crate::interpreter::{Environment, Interpreter, InterpreterOptions};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub options: InterpreterOptions,
    /// Initial variables, in the order they are listed
    pub env: IndexMap<String, String>,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn environment(&self) -> Environment {
        self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    /// Interpreter with these options and initial environment.
    pub fn into_interpreter(self, programs: ProgramRegistry) -> Interpreter {
        let env = self.environment();
        Interpreter::new(programs).with_options(self.options).with_env(env)
    }
}
