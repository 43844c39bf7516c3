use super::AggregateError;
use rdf_reckon_common::{BindingId, EvaluationContext, Expression};
use rdf_reckon_model::{sparql_cmp, TypedValue};

/// MIN and MAX evaluate every row, discard errors, and order what remains
/// with the total SPARQL value ordering. An empty result is `None`: unlike
/// SUM there is no zero default, absence stays absent.
pub(super) fn min(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: &Expression,
) -> Result<Option<TypedValue>, AggregateError> {
    let mut values = evaluated(context, binding_ids, target);
    values.sort_by(sparql_cmp);
    Ok(values.into_iter().next())
}

pub(super) fn max(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: &Expression,
) -> Result<Option<TypedValue>, AggregateError> {
    let mut values = evaluated(context, binding_ids, target);
    values.sort_by(sparql_cmp);
    Ok(values.pop())
}

fn evaluated(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: &Expression,
) -> Vec<TypedValue> {
    binding_ids
        .iter()
        .filter_map(|&id| context.evaluate(target, id).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::aggregates::test_util::{integer, multiset_of, string, target_x};
    use crate::Aggregate;

    fn min() -> Aggregate {
        Aggregate::Min {
            target: target_x(),
            distinct: false,
        }
    }

    fn max() -> Aggregate {
        Aggregate::Max {
            target: target_x(),
            distinct: false,
        }
    }

    #[test]
    fn empty_input_yields_no_result() {
        let multiset = multiset_of(vec![]);
        assert_eq!(min().apply(&multiset, &multiset.ids()), Ok(None));
        assert_eq!(max().apply(&multiset, &multiset.ids()), Ok(None));
    }

    #[test]
    fn orders_numerically() {
        let multiset = multiset_of(vec![
            Some(integer(30)),
            Some(integer(10)),
            Some(integer(20)),
        ]);
        assert_eq!(
            min().apply(&multiset, &multiset.ids()),
            Ok(Some(integer(10)))
        );
        assert_eq!(
            max().apply(&multiset, &multiset.ids()),
            Ok(Some(integer(30)))
        );
    }

    #[test]
    fn unbound_rows_are_discarded() {
        let multiset = multiset_of(vec![None, Some(integer(4)), None]);
        assert_eq!(
            min().apply(&multiset, &multiset.ids()),
            Ok(Some(integer(4)))
        );
    }

    #[test]
    fn numerics_order_before_strings() {
        let multiset = multiset_of(vec![Some(string("a")), Some(integer(1000))]);
        assert_eq!(
            min().apply(&multiset, &multiset.ids()),
            Ok(Some(integer(1000)))
        );
        assert_eq!(
            max().apply(&multiset, &multiset.ids()),
            Ok(Some(string("a")))
        );
    }
}
