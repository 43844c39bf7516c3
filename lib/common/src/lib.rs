mod binding_id;
mod context;
mod error;
mod multiset;

pub use binding_id::BindingId;
pub use context::{EvaluationContext, Expression};
pub use error::EvalError;
pub use multiset::BindingMultiset;
