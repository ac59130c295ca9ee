use levenshtein::levenshtein;
use std::collections::HashMap;
use crate::consts;
use crate::expr::{Expr, MathFunction};

/// A context to use when evaluating an expression, containing the variables and functions that
/// can be referenced from within the expression.
///
/// Contexts form a chain: a child scope created with [`Ctxt::child_scope`] holds a non-owning
/// reference to its parent, and lookups fall through to the parent when a name is absent locally.
/// A child only shadows the parent's bindings, never mutates them, which is what lets a function
/// bind its own parameters without colliding with the caller's bindings of the same names.
///
/// Contexts are mutable and not internally synchronized. The intended pattern is one context
/// (plus transient child scopes) per logical evaluation; sharing one context across threads
/// requires it to be strictly read-only.
#[derive(Debug, Clone)]
pub struct Ctxt<'a> {
    /// The variables in the context, each bound to an expression.
    vars: HashMap<String, Expr>,

    /// The functions in the context.
    funcs: HashMap<String, MathFunction>,

    /// The enclosing scope, if any.
    parent: Option<&'a Ctxt<'a>>,
}

impl Default for Ctxt<'_> {
    fn default() -> Self {
        Self {
            vars: consts::ALL
                .iter()
                .map(|(name, value)| (name.to_string(), Expr::Number(*value)))
                .collect(),
            funcs: HashMap::new(),
            parent: None,
        }
    }
}

impl<'a> Ctxt<'a> {
    /// Creates a new empty context.
    ///
    /// The empty context does not contain the named mathematical constants (`pi`, `e`, and
    /// friends). Consider using the [`Default`] implementation instead.
    pub fn new() -> Ctxt<'static> {
        Ctxt {
            vars: HashMap::new(),
            funcs: HashMap::new(),
            parent: None,
        }
    }

    /// Binds a variable to an expression in this scope, shadowing any binding of the same name
    /// in enclosing scopes.
    pub fn bind_variable(&mut self, name: impl Into<String>, expr: Expr) {
        self.vars.insert(name.into(), expr);
    }

    /// Binds a function in this scope, shadowing any function of the same name in enclosing
    /// scopes.
    pub fn bind_function(&mut self, name: impl Into<String>, func: MathFunction) {
        self.funcs.insert(name.into(), func);
    }

    /// Gets the expression bound to a variable, falling through to enclosing scopes when the
    /// name is absent locally.
    pub fn get_expression(&self, name: &str) -> Option<&Expr> {
        self.vars
            .get(name)
            .or_else(|| self.parent.and_then(|parent| parent.get_expression(name)))
    }

    /// Gets the function bound to a name, falling through to enclosing scopes when the name is
    /// absent locally.
    pub fn get_function(&self, name: &str) -> Option<&MathFunction> {
        self.funcs
            .get(name)
            .or_else(|| self.parent.and_then(|parent| parent.get_function(name)))
    }

    /// Creates a fresh scope whose lookups fall through to this one.
    pub fn child_scope(&self) -> Ctxt<'_> {
        Ctxt {
            vars: HashMap::new(),
            funcs: HashMap::new(),
            parent: Some(self),
        }
    }

    /// Returns all variables reachable from this scope with a name similar to the given name.
    pub fn similar_variables(&self, name: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut scope = Some(self);
        while let Some(ctxt) = scope {
            collect_similar(name, ctxt.vars.keys(), &mut found);
            scope = ctxt.parent;
        }
        found
    }

    /// Returns all functions reachable from this scope with a name similar to the given name.
    pub fn similar_functions(&self, name: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut scope = Some(self);
        while let Some(ctxt) = scope {
            collect_similar(name, ctxt.funcs.keys(), &mut found);
            scope = ctxt.parent;
        }
        found
    }
}

fn collect_similar<'k>(
    name: &str,
    candidates: impl Iterator<Item = &'k String>,
    found: &mut Vec<String>,
) {
    for candidate in candidates {
        if levenshtein(candidate, name) < 2 && !found.contains(candidate) {
            found.push(candidate.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn default_binds_constants() {
        let ctxt = Ctxt::default();
        assert_eq!(ctxt.get_expression("pi"), Some(&Expr::Number(std::f64::consts::PI)));
        assert_eq!(ctxt.get_expression("e"), Some(&Expr::Number(std::f64::consts::E)));
        assert_eq!(ctxt.get_expression("x"), None);
    }

    #[test]
    fn lookup_falls_through_to_parent() {
        let mut outer = Ctxt::new();
        outer.bind_variable("x", Expr::Number(1.0));

        let inner = outer.child_scope();
        assert_eq!(inner.get_expression("x"), Some(&Expr::Number(1.0)));
    }

    #[test]
    fn child_shadows_without_mutating_parent() {
        let mut outer = Ctxt::new();
        outer.bind_variable("x", Expr::Number(1.0));

        let mut inner = outer.child_scope();
        inner.bind_variable("x", Expr::Number(2.0));
        assert_eq!(inner.get_expression("x"), Some(&Expr::Number(2.0)));

        drop(inner);
        assert_eq!(outer.get_expression("x"), Some(&Expr::Number(1.0)));
    }

    #[test]
    fn similar_names_walk_the_chain() {
        let mut outer = Ctxt::new();
        outer.bind_variable("radius", Expr::Number(1.0));

        let mut inner = outer.child_scope();
        inner.bind_variable("radios", Expr::Number(2.0));

        let mut similar = inner.similar_variables("radius");
        similar.sort();
        assert_eq!(similar, vec!["radios".to_string(), "radius".to_string()]);
    }

    #[test]
    fn functions_resolve_through_the_chain() {
        let mut outer = Ctxt::new();
        outer.bind_function(
            "doubleup",
            MathFunction::custom("doubleup", &["x"], Expr::var("x") * Expr::Number(2.0)),
        );

        let inner = outer.child_scope();
        assert!(inner.get_function("doubleup").is_some());
        assert!(inner.get_function("halve").is_none());
    }
}
