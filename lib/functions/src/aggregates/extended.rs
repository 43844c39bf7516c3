//! Numeric aggregate extensions beyond the SPARQL 1.1 built-ins.
//!
//! These skip non-numeric rows the way SUM does, so they always see a clean
//! numeric sequence; absence of numeric rows yields no result.

use super::AggregateError;
use rdf_reckon_common::{BindingId, EvaluationContext, Expression};
use rdf_reckon_model::{numeric_cmp, Numeric, TypedValue};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// Middle element of the sorted numeric rows; the lower middle for even
/// counts. Returns an element of the input, not an interpolated value.
pub(super) fn median(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: &Expression,
) -> Result<Option<TypedValue>, AggregateError> {
    let mut values = numeric_rows(context, binding_ids, target);
    if values.is_empty() {
        return Ok(None);
    }
    values.sort_by(|a, b| numeric_cmp(*a, *b));
    let middle = (values.len() - 1) / 2;
    Ok(Some(TypedValue::NumericLiteral(values[middle])))
}

/// The most frequent value across the rows, by value equality. Ties break
/// towards the value seen first. Unlike the numeric extensions, MODE ranks
/// values of any type.
pub(super) fn mode(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: &Expression,
) -> Result<Option<TypedValue>, AggregateError> {
    let mut frequencies: FxHashMap<TypedValue, usize> = FxHashMap::default();
    let mut first_seen = Vec::new();

    for &id in binding_ids {
        let Ok(value) = context.evaluate(target, id) else {
            continue;
        };
        let entry = frequencies.entry(value.clone()).or_insert(0);
        if *entry == 0 {
            first_seen.push(value);
        }
        *entry += 1;
    }

    let mut best: Option<(&TypedValue, usize)> = None;
    for value in &first_seen {
        let frequency = frequencies[value];
        if best.map_or(true, |(_, count)| frequency > count) {
            best = Some((value, frequency));
        }
    }
    Ok(best.map(|(value, _)| value.clone()))
}

/// Minimum over the numeric rows only, compared in the promotion lattice.
pub(super) fn numeric_min(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: &Expression,
) -> Result<Option<TypedValue>, AggregateError> {
    Ok(numeric_extremum(context, binding_ids, target, Ordering::Less)
        .map(TypedValue::NumericLiteral))
}

/// Maximum over the numeric rows only, compared in the promotion lattice.
pub(super) fn numeric_max(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: &Expression,
) -> Result<Option<TypedValue>, AggregateError> {
    Ok(
        numeric_extremum(context, binding_ids, target, Ordering::Greater)
            .map(TypedValue::NumericLiteral),
    )
}

fn numeric_extremum(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: &Expression,
    keep: Ordering,
) -> Option<Numeric> {
    let mut extremum: Option<Numeric> = None;
    for value in numeric_rows(context, binding_ids, target) {
        extremum = Some(match extremum {
            None => value,
            Some(current) if numeric_cmp(value, current) == keep => value,
            Some(current) => current,
        });
    }
    extremum
}

fn numeric_rows(
    context: &dyn EvaluationContext,
    binding_ids: &[BindingId],
    target: &Expression,
) -> Vec<Numeric> {
    binding_ids
        .iter()
        .filter_map(|&id| context.evaluate(target, id).ok())
        .filter_map(|value| value.as_numeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::aggregates::test_util::{integer, multiset_of, string, target_x};
    use crate::Aggregate;
    use rdf_reckon_model::{Double, Numeric, TypedValue};

    fn double(value: f64) -> TypedValue {
        TypedValue::NumericLiteral(Numeric::Double(Double::from(value)))
    }

    #[test]
    fn median_picks_the_middle_element() {
        let multiset = multiset_of(vec![
            Some(integer(1)),
            Some(integer(5)),
            Some(integer(3)),
        ]);
        let median = Aggregate::Median { target: target_x() };
        assert_eq!(
            median.apply(&multiset, &multiset.ids()),
            Ok(Some(integer(3)))
        );
    }

    #[test]
    fn median_of_even_counts_is_the_lower_middle() {
        let multiset = multiset_of(vec![
            Some(integer(4)),
            Some(integer(1)),
            Some(integer(3)),
            Some(integer(2)),
        ]);
        let median = Aggregate::Median { target: target_x() };
        assert_eq!(
            median.apply(&multiset, &multiset.ids()),
            Ok(Some(integer(2)))
        );
    }

    #[test]
    fn median_of_no_numeric_rows_is_absent() {
        let multiset = multiset_of(vec![Some(string("a")), None]);
        let median = Aggregate::Median { target: target_x() };
        assert_eq!(median.apply(&multiset, &multiset.ids()), Ok(None));
    }

    #[test]
    fn mode_picks_the_most_frequent_value() {
        let multiset = multiset_of(vec![
            Some(integer(2)),
            Some(integer(3)),
            Some(integer(2)),
        ]);
        let mode = Aggregate::Mode { target: target_x() };
        assert_eq!(mode.apply(&multiset, &multiset.ids()), Ok(Some(integer(2))));
    }

    #[test]
    fn mode_breaks_ties_by_first_occurrence() {
        let multiset = multiset_of(vec![
            Some(integer(7)),
            Some(integer(3)),
            Some(integer(3)),
            Some(integer(7)),
        ]);
        let mode = Aggregate::Mode { target: target_x() };
        assert_eq!(mode.apply(&multiset, &multiset.ids()), Ok(Some(integer(7))));
    }

    #[test]
    fn numeric_extrema_skip_non_numerics() {
        let multiset = multiset_of(vec![
            Some(string("z")),
            Some(integer(5)),
            Some(double(2.5)),
            None,
        ]);
        let nmin = Aggregate::NumericMin { target: target_x() };
        let nmax = Aggregate::NumericMax { target: target_x() };
        assert_eq!(
            nmin.apply(&multiset, &multiset.ids()),
            Ok(Some(double(2.5)))
        );
        assert_eq!(
            nmax.apply(&multiset, &multiset.ids()),
            Ok(Some(integer(5)))
        );
    }

    #[test]
    fn numeric_extrema_of_no_numeric_rows_are_absent() {
        let multiset = multiset_of(vec![Some(string("a"))]);
        let nmin = Aggregate::NumericMin { target: target_x() };
        assert_eq!(nmin.apply(&multiset, &multiset.ids()), Ok(None));
    }
}
