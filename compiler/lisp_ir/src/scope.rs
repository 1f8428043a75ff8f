//! Scope chains.
//!
//! A [`Scope`] is one frame of bindings plus an optional borrowed parent.
//! Lookup walks outward; definition always targets the innermost frame, so
//! an inner binding shadows an outer one without touching it.
//!
//! The same structure backs the interpreter (values) and the SSA lowering
//! (storage slots), so it is generic over the bound payload.

use rustc_hash::FxHashMap;

/// A single frame of name bindings with a borrowed parent.
#[derive(Debug)]
pub struct Scope<'p, T> {
    bindings: FxHashMap<String, T>,
    parent: Option<&'p Scope<'p, T>>,
}

impl<'p, T> Scope<'p, T> {
    /// Create a root scope.
    pub fn new() -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: None,
        }
    }

    /// Create a child scope whose lookups fall through to `parent`.
    pub fn with_parent(parent: &'p Scope<'p, T>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this frame, replacing any binding of the same name in
    /// this frame.
    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: T) {
        self.bindings.insert(name.into(), value);
    }

    /// Find the innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<&T> {
        let mut scope = self;
        loop {
            if let Some(value) = scope.bindings.get(name) {
                return Some(value);
            }
            scope = scope.parent?;
        }
    }

    /// Whether `name` is bound in this frame (ignoring parents).
    #[inline]
    pub fn contains_local(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of frames from this one up to the root, inclusive.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut scope = self;
        while let Some(parent) = scope.parent {
            depth += 1;
            scope = parent;
        }
        depth
    }
}

impl<T> Default for Scope<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}
