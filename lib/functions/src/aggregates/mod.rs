mod avg;
mod count;
mod extended;
mod group_concat;
mod min_max;
mod sample;
mod sum;
mod totals;

use rdf_reckon_common::{BindingId, EvalError, EvaluationContext, Expression};
use rdf_reckon_model::{Integer, Numeric, TypedValue, Variable};
use std::fmt;
use thiserror::Error;

/// An aggregate could not be applied at all.
///
/// Per-row evaluation failures are not aggregate errors; each aggregate's
/// skip or fail-fast policy decides what they mean. These are the failures
/// that invalidate the whole application.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregateError {
    /// The aggregated variable does not occur in the graph pattern the rows
    /// come from.
    #[error("cannot use the variable {variable} in a {functor} aggregate since the variable does not occur in a graph pattern")]
    VariableNotInScope {
        variable: Variable,
        functor: &'static str,
    },
    /// A running total left the representable range.
    #[error("numeric overflow while computing {functor}")]
    NumericOverflow { functor: &'static str },
    /// GROUP_CONCAT met a row without a defined, string-castable value.
    /// Concatenation with an undefined term is meaningless, so this is a
    /// hard error rather than a skipped row.
    #[error("GROUP_CONCAT requires every row to evaluate to a defined value: {source}")]
    UndefinedConcatOperand {
        #[source]
        source: EvalError,
    },
}

/// A SPARQL aggregate descriptor.
///
/// Descriptors are created once per query compilation and hold no
/// accumulation state: [`apply`] keeps all running totals on its own stack,
/// so one descriptor can be applied to any number of groups, concurrently if
/// the evaluation context supports concurrent reads.
///
/// [`apply`]: Aggregate::apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregate {
    /// `COUNT(expr)`, or `COUNT(*)` when no target is given.
    Count { target: Option<Expression> },
    /// `COUNT(DISTINCT expr)`, or `COUNT(DISTINCT *)` when no target is
    /// given. Distinctness is by value for an expression and by whole row
    /// for `*`.
    CountDistinct { target: Option<Expression> },
    Sum { target: Expression, distinct: bool },
    Avg { target: Expression, distinct: bool },
    Min { target: Expression, distinct: bool },
    Max { target: Expression, distinct: bool },
    Sample { target: Expression },
    GroupConcat {
        target: Expression,
        /// Joins the parts; a single space when not given.
        separator: Option<String>,
        distinct: bool,
    },
    /// Middle element of the numeric rows (lower middle for even counts).
    Median { target: Expression },
    /// Most frequent value; ties break towards the earliest first occurrence.
    Mode { target: Expression },
    /// Minimum over numeric rows only, compared in the promotion lattice.
    NumericMin { target: Expression },
    /// Maximum over numeric rows only, compared in the promotion lattice.
    NumericMax { target: Expression },
}

impl Aggregate {
    /// Reduces the given rows to a single value.
    ///
    /// `Ok(None)` encodes "no result": the aggregate evaluated cleanly but
    /// has nothing to report (an empty MIN, an AVG that met a non-numeric
    /// row, a SAMPLE whose every row errored).
    pub fn apply(
        &self,
        context: &dyn EvaluationContext,
        binding_ids: &[BindingId],
    ) -> Result<Option<TypedValue>, AggregateError> {
        self.check_scope(context)?;
        match self {
            Aggregate::Count { target } => count::count(context, binding_ids, target.as_ref()),
            Aggregate::CountDistinct { target } => {
                count::count_distinct(context, binding_ids, target.as_ref())
            }
            Aggregate::Sum { target, distinct } => {
                sum::sum(context, binding_ids, target, *distinct)
            }
            Aggregate::Avg { target, distinct } => {
                avg::avg(context, binding_ids, target, *distinct)
            }
            Aggregate::Min { target, .. } => min_max::min(context, binding_ids, target),
            Aggregate::Max { target, .. } => min_max::max(context, binding_ids, target),
            Aggregate::Sample { target } => sample::sample(context, binding_ids, target),
            Aggregate::GroupConcat {
                target,
                separator,
                distinct,
            } => group_concat::group_concat(
                context,
                binding_ids,
                target,
                separator.as_deref(),
                *distinct,
            ),
            Aggregate::Median { target } => extended::median(context, binding_ids, target),
            Aggregate::Mode { target } => extended::mode(context, binding_ids, target),
            Aggregate::NumericMin { target } => {
                extended::numeric_min(context, binding_ids, target)
            }
            Aggregate::NumericMax { target } => {
                extended::numeric_max(context, binding_ids, target)
            }
        }
    }

    /// The SPARQL keyword of the aggregate, for serialization.
    #[must_use]
    pub fn functor(&self) -> &'static str {
        match self {
            Aggregate::Count { .. } | Aggregate::CountDistinct { .. } => "COUNT",
            Aggregate::Sum { .. } => "SUM",
            Aggregate::Avg { .. } => "AVG",
            Aggregate::Min { .. } => "MIN",
            Aggregate::Max { .. } => "MAX",
            Aggregate::Sample { .. } => "SAMPLE",
            Aggregate::GroupConcat { .. } => "GROUP_CONCAT",
            Aggregate::Median { .. } => "MEDIAN",
            Aggregate::Mode { .. } => "MODE",
            Aggregate::NumericMin { .. } => "NMIN",
            Aggregate::NumericMax { .. } => "NMAX",
        }
    }

    /// Aggregates over a plain variable require the variable to occur in the
    /// graph pattern; anything else is a query authoring error, not an empty
    /// group.
    fn check_scope(&self, context: &dyn EvaluationContext) -> Result<(), AggregateError> {
        let target = match self {
            Aggregate::Count { target } | Aggregate::CountDistinct { target } => target.as_ref(),
            Aggregate::Sum { target, .. }
            | Aggregate::Avg { target, .. }
            | Aggregate::Min { target, .. }
            | Aggregate::Max { target, .. }
            | Aggregate::Median { target }
            | Aggregate::Mode { target }
            | Aggregate::NumericMin { target }
            | Aggregate::NumericMax { target } => Some(target),
            // SAMPLE and GROUP_CONCAT accept any target unchecked.
            Aggregate::Sample { .. } | Aggregate::GroupConcat { .. } => None,
        };
        if let Some(Expression::Variable(variable)) = target {
            if !context.variables().contains(variable) {
                return Err(AggregateError::VariableNotInScope {
                    variable: variable.clone(),
                    functor: self.functor(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregate::Count { target: None } => write!(f, "COUNT(*)"),
            Aggregate::Count {
                target: Some(target),
            } => write!(f, "COUNT({target})"),
            Aggregate::CountDistinct { target: None } => write!(f, "COUNT(DISTINCT *)"),
            Aggregate::CountDistinct {
                target: Some(target),
            } => write!(f, "COUNT(DISTINCT {target})"),
            Aggregate::Sum { target, distinct }
            | Aggregate::Avg { target, distinct }
            | Aggregate::Min { target, distinct }
            | Aggregate::Max { target, distinct } => {
                write!(
                    f,
                    "{}({}{target})",
                    self.functor(),
                    if *distinct { "DISTINCT " } else { "" }
                )
            }
            Aggregate::Sample { target }
            | Aggregate::Median { target }
            | Aggregate::Mode { target }
            | Aggregate::NumericMin { target }
            | Aggregate::NumericMax { target } => {
                write!(f, "{}({target})", self.functor())
            }
            Aggregate::GroupConcat {
                target,
                separator,
                distinct,
            } => {
                write!(
                    f,
                    "GROUP_CONCAT({}{target}",
                    if *distinct { "DISTINCT " } else { "" }
                )?;
                if let Some(separator) = separator {
                    write!(f, " ; SEPARATOR = \"{separator}\"")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// An integer result value, the common shape of every counting aggregate.
fn integer_value(count: usize) -> TypedValue {
    let count = i64::try_from(count).unwrap_or(i64::MAX);
    TypedValue::NumericLiteral(Numeric::Integer(Integer::from(count)))
}
