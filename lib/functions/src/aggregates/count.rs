use super::{integer_value, AggregateError};
use rdf_reckon_common::{BindingId, EvaluationContext, Expression};
use rdf_reckon_model::TypedValue;
use rustc_hash::FxHashSet;

/// COUNT(expr) counts the rows whose evaluation succeeds; COUNT(*) counts
/// rows directly. Evaluation errors never fail a COUNT, they just do not
/// count.
pub(super) fn count(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: Option<&Expression>,
) -> Result<Option<TypedValue>, AggregateError> {
    let count = match target {
        None => binding_ids.len(),
        Some(target) => binding_ids
            .iter()
            .filter(|&&id| context.evaluate(target, id).is_ok())
            .count(),
    };
    Ok(Some(integer_value(count)))
}

/// COUNT(DISTINCT expr) counts distinct successful values; COUNT(DISTINCT *)
/// counts distinct whole rows, comparing the full binding structurally.
pub(super) fn count_distinct(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: Option<&Expression>,
) -> Result<Option<TypedValue>, AggregateError> {
    let count = match target {
        None => {
            let rows: FxHashSet<_> = binding_ids
                .iter()
                .filter_map(|&id| context.row(id))
                .collect();
            rows.len()
        }
        Some(target) => {
            let values: FxHashSet<_> = binding_ids
                .iter()
                .filter_map(|&id| context.evaluate(target, id).ok())
                .collect();
            values.len()
        }
    };
    Ok(Some(integer_value(count)))
}

#[cfg(test)]
mod tests {
    use crate::aggregates::test_util::{integer, multiset_of, string, target_x, var_x};
    use crate::Aggregate;
    use rdf_reckon_common::BindingMultiset;
    use rdf_reckon_model::Variable;

    #[test]
    fn count_skips_unbound_rows() {
        let multiset = multiset_of(vec![Some(integer(1)), None, Some(integer(2))]);
        let count = Aggregate::Count {
            target: Some(target_x()),
        };
        assert_eq!(
            count.apply(&multiset, &multiset.ids()),
            Ok(Some(integer(2)))
        );
    }

    #[test]
    fn count_all_counts_every_row() {
        let multiset = multiset_of(vec![Some(integer(1)), None, None]);
        let count = Aggregate::Count { target: None };
        assert_eq!(
            count.apply(&multiset, &multiset.ids()),
            Ok(Some(integer(3)))
        );
    }

    #[test]
    fn count_distinct_dedups_by_value() {
        let multiset = multiset_of(vec![
            Some(integer(2)),
            Some(integer(2)),
            Some(integer(3)),
        ]);
        let count = Aggregate::CountDistinct {
            target: Some(target_x()),
        };
        assert_eq!(
            count.apply(&multiset, &multiset.ids()),
            Ok(Some(integer(2)))
        );
    }

    #[test]
    fn count_distinct_distinguishes_types() {
        let multiset = multiset_of(vec![Some(integer(2)), Some(string("2"))]);
        let count = Aggregate::CountDistinct {
            target: Some(target_x()),
        };
        assert_eq!(
            count.apply(&multiset, &multiset.ids()),
            Ok(Some(integer(2)))
        );
    }

    #[test]
    fn count_distinct_all_compares_whole_rows() {
        let x = var_x();
        let y = Variable::new_unchecked("y");
        let mut multiset = BindingMultiset::new(vec![x.clone(), y.clone()]);
        multiset.push([(x.clone(), integer(1)), (y.clone(), integer(2))]);
        multiset.push([(x.clone(), integer(1)), (y.clone(), integer(2))]);
        multiset.push([(x.clone(), integer(1)), (y.clone(), integer(3))]);
        multiset.push([(x.clone(), integer(1))]);

        let count = Aggregate::CountDistinct { target: None };
        assert_eq!(
            count.apply(&multiset, &multiset.ids()),
            Ok(Some(integer(3)))
        );
    }
}
