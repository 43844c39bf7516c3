use rdf_reckon_model::{InvalidCastError, LexicalFormError, Variable};
use thiserror::Error;

/// An expression evaluation failure for a single binding.
///
/// These are per-row outcomes, not exceptions: the aggregate engine inspects
/// the `Result` tag to implement its skip-on-error or fail-fast policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    /// The variable has no value in the given binding.
    #[error("variable {0} is not bound")]
    UnboundVariable(Variable),
    /// A coercion inside the expression was rejected.
    #[error(transparent)]
    InvalidCast(#[from] InvalidCastError),
    /// A literal failed to parse under its datatype.
    #[error(transparent)]
    LexicalForm(#[from] LexicalFormError),
}
