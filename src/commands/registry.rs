// src/commands/registry.rs
use std::collections::HashMap;
use std::rc::Rc;

use super::types::Program;

/// Maps program names to their implementations.
#[derive(Clone)]
pub struct ProgramRegistry {
    programs: HashMap<String, Rc<dyn Program>>,
}

impl ProgramRegistry {
    pub fn new() -> Self {
        Self {
            programs: HashMap::new(),
        }
    }

    /// Registers `program` under its own name, replacing any previous entry.
    pub fn register(&mut self, program: Rc<dyn Program>) {
        self.programs.insert(program.name().to_string(), program);
    }

    /// Owned handle so the caller can invoke it while mutating the interpreter.
    pub fn get(&self, name: &str) -> Option<Rc<dyn Program>> {
        self.programs.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.programs.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

impl Default for ProgramRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use super::echo::EchoProgram;
use super::printenv_cmd::PrintenvProgram;
use super::true_cmd::{ColonProgram, FalseProgram, TrueProgram};

/// 注册所有内置程序
pub fn register_builtins(registry: &mut ProgramRegistry) {
    registry.register(Rc::new(EchoProgram));
    registry.register(Rc::new(TrueProgram));
    registry.register(Rc::new(FalseProgram));
    registry.register(Rc::new(ColonProgram));
    registry.register(Rc::new(PrintenvProgram));
}

/// 创建包含所有内置程序的注册表
pub fn create_builtin_registry() -> ProgramRegistry {
    let mut registry = ProgramRegistry::new();
    register_builtins(&mut registry);
    registry
}
