use crate::{BindingId, EvalError};
use rdf_reckon_model::{TypedValue, Variable};
use std::fmt;

/// The target of an aggregate.
///
/// The full SPARQL expression language lives in the query engine; the
/// aggregate engine only distinguishes a plain variable reference (which it
/// can check for scope) from anything else, which it hands to the context
/// for evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Variable(Variable),
    Constant(TypedValue),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Variable(variable) => variable.fmt(f),
            Expression::Constant(value) => value.fmt(f),
        }
    }
}

/// Read-only access to the rows of a result multiset.
///
/// Implemented by the query engine. All access is read-only; one context may
/// serve several aggregate instances concurrently if the implementation is
/// safe for concurrent reads (a contract of the implementor, not enforced
/// here).
pub trait EvaluationContext {
    /// The variables that occur in the graph pattern the rows come from.
    fn variables(&self) -> &[Variable];

    /// Evaluates the expression against one row.
    fn evaluate(&self, expression: &Expression, binding: BindingId)
        -> Result<TypedValue, EvalError>;

    /// The whole row, with one entry per [`variables`](Self::variables)
    /// element. `None` if the id does not name a row.
    fn row(&self, binding: BindingId) -> Option<Vec<Option<TypedValue>>>;
}
