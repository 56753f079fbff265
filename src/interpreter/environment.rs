//! Variable Environment
//!
//! String-to-string variable store with stacked overlay scopes. The base
//! layer lives for the whole script; the dispatcher pushes a scope before a
//! call's prefix assignments and pops it afterwards, which discards the
//! assignments together with anything the call itself wrote.

use indexmap::IndexMap;

/// Handle returned by [`Environment::push_scope`]. Popping with it restores
/// the environment to exactly the layers that existed when it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a pushed scope must be popped to discard its bindings"]
pub struct ScopeGuard {
    depth: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    /// layers[0] is the base scope; writes go to the last layer
    layers: Vec<IndexMap<String, String>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            layers: vec![IndexMap::new()],
        }
    }

    /// Independent deep copy. Mutating the copy never affects `self`.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Value of `name`, or the empty string when unset.
    pub fn get(&self, name: &str) -> String {
        self.get_raw(name).map(str::to_string).unwrap_or_default()
    }

    /// Value of `name`, distinguishing unset (None) from set-to-empty.
    pub fn get_raw(&self, name: &str) -> Option<&str> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.get(name))
            .map(String::as_str)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get_raw(name).is_some()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        // pop_scope never truncates below the base layer
        if let Some(top) = self.layers.last_mut() {
            top.insert(name.into(), value.into());
        }
    }

    pub fn push_scope(&mut self) -> ScopeGuard {
        let depth = self.layers.len();
        self.layers.push(IndexMap::new());
        ScopeGuard { depth }
    }

    /// Drop the scope taken by `guard` and every scope pushed after it.
    pub fn pop_scope(&mut self, guard: ScopeGuard) {
        self.layers.truncate(guard.depth.max(1));
    }

    /// Number of stacked scopes above the base layer.
    pub fn scope_depth(&self) -> usize {
        self.layers.len().saturating_sub(1)
    }

    /// Visible bindings, ordered by the first time each name was set.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut visible: IndexMap<&str, &str> = IndexMap::new();
        for layer in &self.layers {
            for (name, value) in layer {
                visible.insert(name.as_str(), value.as_str());
            }
        }
        visible.into_iter()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(IndexMap::is_empty)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Environment::new();
        for (name, value) in iter {
            env.set(name, value);
        }
        env
    }
}
