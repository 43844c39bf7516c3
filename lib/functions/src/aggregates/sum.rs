use super::totals::TieredTotals;
use super::AggregateError;
use rdf_reckon_common::{BindingId, EvaluationContext, Expression};
use rdf_reckon_model::{Integer, Numeric, TypedValue};
use rustc_hash::FxHashSet;

/// SUM accumulates the numeric rows in four parallel tiers and reports the
/// tier of the maximum observed kind.
///
/// Rows that error or evaluate to a non-numeric are skipped, so SUM always
/// produces a value: summing nothing yields integer zero.
pub(super) fn sum(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: &Expression,
    distinct: bool,
) -> Result<Option<TypedValue>, AggregateError> {
    let mut totals = TieredTotals::new();
    let mut seen = FxHashSet::default();

    for &id in binding_ids {
        let Ok(value) = context.evaluate(target, id) else {
            continue;
        };
        if distinct && !seen.insert(value.clone()) {
            continue;
        }
        let Some(numeric) = value.as_numeric() else {
            continue;
        };
        totals
            .add(numeric)
            .ok_or(AggregateError::NumericOverflow { functor: "SUM" })?;
    }

    let sum = totals
        .sum()
        .unwrap_or(Numeric::Integer(Integer::from(0)));
    Ok(Some(TypedValue::NumericLiteral(sum)))
}

#[cfg(test)]
mod tests {
    use crate::aggregates::test_util::{integer, multiset_of, string, target_x};
    use crate::Aggregate;
    use rdf_reckon_model::{Decimal, Numeric, TypedValue};
    use std::str::FromStr;

    fn sum() -> Aggregate {
        Aggregate::Sum {
            target: target_x(),
            distinct: false,
        }
    }

    fn decimal(value: &str) -> TypedValue {
        TypedValue::NumericLiteral(Numeric::Decimal(Decimal::from_str(value).unwrap()))
    }

    #[test]
    fn promotes_to_the_maximum_tier() {
        let multiset = multiset_of(vec![Some(integer(1)), Some(decimal("2.5"))]);
        assert_eq!(
            sum().apply(&multiset, &multiset.ids()),
            Ok(Some(decimal("3.5")))
        );
    }

    #[test]
    fn empty_input_yields_integer_zero() {
        let multiset = multiset_of(vec![]);
        assert_eq!(
            sum().apply(&multiset, &multiset.ids()),
            Ok(Some(integer(0)))
        );
    }

    #[test]
    fn skips_errors_and_non_numerics() {
        let multiset = multiset_of(vec![
            Some(integer(1)),
            None,
            Some(string("not a number")),
            Some(integer(2)),
        ]);
        assert_eq!(
            sum().apply(&multiset, &multiset.ids()),
            Ok(Some(integer(3)))
        );
    }

    #[test]
    fn distinct_dedups_before_accumulating() {
        let multiset = multiset_of(vec![
            Some(integer(5)),
            Some(integer(5)),
            Some(integer(2)),
        ]);
        let distinct_sum = Aggregate::Sum {
            target: target_x(),
            distinct: true,
        };
        assert_eq!(
            distinct_sum.apply(&multiset, &multiset.ids()),
            Ok(Some(integer(7)))
        );
    }
}
