use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::runtime::Object;

/// Environment for variable scoping
///
/// A stack of scopes forming a parent chain. Lookup resolves in the nearest
/// enclosing scope first; a `let` writes only the current scope, never a
/// parent's.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Stack of nested scopes
    scopes: Vec<Scope>,
}

/// Single scope in the environment
#[derive(Debug, Clone)]
struct Scope {
    /// Variables defined in this scope
    variables: HashMap<String, Object>,
    /// Index of parent scope (None for the root scope)
    parent: Option<usize>,
}

impl Environment {
    /// Creates a new environment with a root scope
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope {
                variables: HashMap::new(),
                parent: None,
            }],
        }
    }

    /// Enters a new nested scope
    pub fn enter_scope(&mut self) {
        let parent_idx = self.scopes.len() - 1;
        self.scopes.push(Scope {
            variables: HashMap::new(),
            parent: Some(parent_idx),
        });
    }

    /// Exits the current scope and returns to the parent scope
    ///
    /// The root scope is never popped.
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Binds a name in the current scope, overwriting any existing binding
    /// in that exact scope only
    pub fn define(&mut self, name: String, value: Object) {
        let current_scope = self
            .scopes
            .last_mut()
            .expect("environment always has a root scope");
        current_scope.variables.insert(name, value);
    }

    /// Resolves a name, walking the scope chain from innermost to outermost
    pub fn get(&self, name: &str) -> Result<Object> {
        let mut scope_idx = self.scopes.len() - 1;
        loop {
            let scope = &self.scopes[scope_idx];
            if let Some(val) = scope.variables.get(name) {
                return Ok(val.clone());
            }
            match scope.parent {
                Some(parent) => scope_idx = parent,
                None => {
                    return Err(Error::UndefinedVariable {
                        name: name.to_string(),
                    })
                }
            }
        }
    }

    /// Checks whether a name resolves in any enclosing scope
    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Returns the current scope depth (1 for the root scope)
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Returns all bindings visible from the current scope, innermost
    /// binding winning. Used to capture closures at function declaration.
    pub fn snapshot(&self) -> HashMap<String, Object> {
        let mut result = HashMap::new();

        // Outermost first so inner bindings overwrite shadowed ones.
        let mut chain = Vec::new();
        let mut scope_idx = Some(self.scopes.len() - 1);
        while let Some(idx) = scope_idx {
            chain.push(idx);
            scope_idx = self.scopes[idx].parent;
        }
        for idx in chain.into_iter().rev() {
            for (k, v) in &self.scopes[idx].variables {
                result.insert(k.clone(), v.clone());
            }
        }

        result
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
