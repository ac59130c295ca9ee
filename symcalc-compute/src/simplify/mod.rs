//! Algebraic simplification of expressions.
//!
//! [`simplify`] runs **one** post-order pass over the tree: each node first simplifies its
//! children, then applies a fixed, ordered list of local rewrite rules keyed on the simplified
//! children's shape, falling back to reconstructing itself from the simplified children when no
//! rule fires.
//!
//! Because this is a single pass rather than iteration to a fixed point, some inputs need more
//! than one call to reach a stable form; call sites decide how many passes they want. The rules
//! themselves live in [`rules`], grouped by the node family they rewrite.

pub mod rules;
pub mod step;

pub use step::Step;

use crate::expr::{Expr, FunctionKind, MathFunction};
use crate::step_collector::StepCollector;

/// Applies one post-order simplification pass to the expression, returning the new tree.
pub fn simplify(expr: &Expr) -> Expr {
    simplify_with(expr, &mut ())
}

/// Applies one post-order simplification pass to the expression, recording each rule that fires
/// in the given step collector.
pub fn simplify_with(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let expr = simplify_children(expr, step_collector);
    rules::all(&expr, step_collector).unwrap_or(expr)
}

/// Rebuilds the node with all of its children simplified.
fn simplify_children(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    match expr {
        Expr::Number(_) | Expr::Variable(_) | Expr::Interval(_) => expr.clone(),
        Expr::Bound(inner) => Expr::Bound(Box::new(simplify_with(inner, step_collector))),
        Expr::Vector(components) => Expr::Vector(
            components
                .iter()
                .map(|component| simplify_with(component, step_collector))
                .collect(),
        ),
        Expr::Neg(inner) => Expr::Neg(Box::new(simplify_with(inner, step_collector))),
        Expr::Binary(op, lhs, rhs) => Expr::Binary(
            *op,
            Box::new(simplify_with(lhs, step_collector)),
            Box::new(simplify_with(rhs, step_collector)),
        ),
        Expr::Function(func) => {
            Expr::Function(Box::new(simplify_function(func, step_collector)))
        },
    }
}

fn simplify_function(
    func: &MathFunction,
    step_collector: &mut dyn StepCollector<Step>,
) -> MathFunction {
    MathFunction {
        name: func.name.clone(),
        args: func
            .args
            .iter()
            .map(|arg| simplify_with(arg, step_collector))
            .collect(),
        kind: match &func.kind {
            FunctionKind::Custom { body } => FunctionKind::Custom {
                body: Box::new(simplify_with(body, step_collector)),
            },
            FunctionKind::Composite { f, g } => FunctionKind::Composite {
                f: Box::new(simplify_function(f, step_collector)),
                g: Box::new(simplify_function(g, step_collector)),
            },
            kind => kind.clone(),
        },
    }
}
