use super::totals::TieredTotals;
use super::AggregateError;
use rdf_reckon_common::{BindingId, EvaluationContext, Expression};
use rdf_reckon_model::TypedValue;
use rustc_hash::FxHashSet;

/// AVG accumulates like SUM but fails fast: any row that errors, is unbound
/// or evaluates to a non-numeric makes the whole aggregate report no result.
///
/// This asymmetry with SUM follows the SPARQL aggregate semantics, where an
/// error inside AVG's operand invalidates the average while SUM treats the
/// row as simply not contributing.
pub(super) fn avg(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: &Expression,
    distinct: bool,
) -> Result<Option<TypedValue>, AggregateError> {
    let mut totals = TieredTotals::new();
    let mut seen = FxHashSet::default();
    let mut count: i64 = 0;

    for &id in binding_ids {
        let Ok(value) = context.evaluate(target, id) else {
            return Ok(None);
        };
        if distinct && !seen.insert(value.clone()) {
            continue;
        }
        let Some(numeric) = value.as_numeric() else {
            return Ok(None);
        };
        totals
            .add(numeric)
            .ok_or(AggregateError::NumericOverflow { functor: "AVG" })?;
        count += 1;
    }

    if count == 0 {
        return Ok(Some(super::integer_value(0)));
    }
    let average = totals
        .average(count)
        .ok_or(AggregateError::NumericOverflow { functor: "AVG" })?;
    Ok(Some(TypedValue::NumericLiteral(average)))
}

#[cfg(test)]
mod tests {
    use crate::aggregates::test_util::{integer, multiset_of, string, target_x};
    use crate::Aggregate;
    use rdf_reckon_model::{Decimal, Numeric, TypedValue};
    use std::str::FromStr;

    fn avg() -> Aggregate {
        Aggregate::Avg {
            target: target_x(),
            distinct: false,
        }
    }

    fn decimal(value: &str) -> TypedValue {
        TypedValue::NumericLiteral(Numeric::Decimal(Decimal::from_str(value).unwrap()))
    }

    #[test]
    fn fails_fast_on_non_numeric_rows() {
        let multiset = multiset_of(vec![Some(integer(5)), Some(string("not a number"))]);
        assert_eq!(avg().apply(&multiset, &multiset.ids()), Ok(None));
    }

    #[test]
    fn fails_fast_on_unbound_rows() {
        let multiset = multiset_of(vec![Some(integer(5)), None]);
        assert_eq!(avg().apply(&multiset, &multiset.ids()), Ok(None));
    }

    #[test]
    fn empty_input_yields_integer_zero() {
        let multiset = multiset_of(vec![]);
        assert_eq!(
            avg().apply(&multiset, &multiset.ids()),
            Ok(Some(integer(0)))
        );
    }

    #[test]
    fn integer_rows_average_to_a_decimal() {
        let multiset = multiset_of(vec![Some(integer(1)), Some(integer(2))]);
        assert_eq!(
            avg().apply(&multiset, &multiset.ids()),
            Ok(Some(decimal("1.5")))
        );
    }

    #[test]
    fn distinct_averages_over_distinct_values() {
        let multiset = multiset_of(vec![
            Some(integer(2)),
            Some(integer(2)),
            Some(integer(4)),
        ]);
        let distinct_avg = Aggregate::Avg {
            target: target_x(),
            distinct: true,
        };
        assert_eq!(
            distinct_avg.apply(&multiset, &multiset.ids()),
            Ok(Some(decimal("3")))
        );
    }
}
