use super::AggregateError;
use itertools::Itertools;
use rdf_reckon_common::{BindingId, EvaluationContext, Expression};
use rdf_reckon_model::TypedValue;
use rustc_hash::FxHashSet;

/// GROUP_CONCAT joins the string form of every row with the separator.
///
/// A row that fails to evaluate, or whose value has no string form, is a
/// hard error: concatenation with an undefined term is meaningless, so the
/// skip policy of SUM does not apply here.
pub(super) fn group_concat(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: &Expression,
    separator: Option<&str>,
    distinct: bool,
) -> Result<Option<TypedValue>, AggregateError> {
    let separator = separator.unwrap_or(" ");
    let mut seen = FxHashSet::default();
    let mut parts = Vec::with_capacity(binding_ids.len());

    for &id in binding_ids {
        let value = context
            .evaluate(target, id)
            .map_err(|source| AggregateError::UndefinedConcatOperand { source })?;
        let text = value
            .as_string()
            .map_err(|source| AggregateError::UndefinedConcatOperand {
                source: source.into(),
            })?;
        if distinct && !seen.insert(text.clone()) {
            continue;
        }
        parts.push(text);
    }

    Ok(Some(TypedValue::SimpleLiteral(
        parts.iter().join(separator),
    )))
}
