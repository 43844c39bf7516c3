use super::AggregateError;
use rdf_reckon_common::{BindingId, EvaluationContext, Expression};
use rdf_reckon_model::TypedValue;

/// SAMPLE returns the first row, in iteration order, whose evaluation
/// succeeds. If every row errors the result is `None`.
pub(super) fn sample(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: &Expression,
) -> Result<Option<TypedValue>, AggregateError> {
    Ok(binding_ids
        .iter()
        .find_map(|&id| context.evaluate(target, id).ok()))
}

#[cfg(test)]
mod tests {
    use crate::aggregates::test_util::{integer, multiset_of, target_x};
    use crate::Aggregate;

    fn sample() -> Aggregate {
        Aggregate::Sample { target: target_x() }
    }

    #[test]
    fn returns_the_first_defined_row() {
        let multiset = multiset_of(vec![None, Some(integer(42)), Some(integer(99))]);
        assert_eq!(
            sample().apply(&multiset, &multiset.ids()),
            Ok(Some(integer(42)))
        );
    }

    #[test]
    fn all_unbound_yields_no_result() {
        let multiset = multiset_of(vec![None, None]);
        assert_eq!(sample().apply(&multiset, &multiset.ids()), Ok(None));
    }
}
