//! Cross-aggregate policy checks: the same group of rows, run through every
//! aggregate, must exhibit the skip / fail-fast / hard-error asymmetries.

use rdf_reckon_common::{BindingMultiset, Expression};
use rdf_reckon_functions::{Aggregate, AggregateError};
use rdf_reckon_model::{Integer, Numeric, TypedValue, Variable};

fn x() -> Variable {
    Variable::new_unchecked("x")
}

fn target() -> Expression {
    Expression::Variable(x())
}

fn integer(value: i64) -> TypedValue {
    TypedValue::NumericLiteral(Numeric::Integer(Integer::from(value)))
}

/// Rows: 1, <unbound>, "pear", 3.
fn mixed_group() -> BindingMultiset {
    let mut rows = BindingMultiset::new(vec![x()]);
    rows.push([(x(), integer(1))]);
    rows.push([]);
    rows.push([(x(), TypedValue::SimpleLiteral("pear".to_owned()))]);
    rows.push([(x(), integer(3))]);
    rows
}

#[test]
fn sum_skips_what_avg_rejects() {
    let rows = mixed_group();
    let ids = rows.ids();

    let sum = Aggregate::Sum {
        target: target(),
        distinct: false,
    };
    assert_eq!(sum.apply(&rows, &ids), Ok(Some(integer(4))));

    let avg = Aggregate::Avg {
        target: target(),
        distinct: false,
    };
    assert_eq!(avg.apply(&rows, &ids), Ok(None));
}

#[test]
fn count_sees_bound_rows_only_count_all_sees_every_row() {
    let rows = mixed_group();
    let ids = rows.ids();

    let count = Aggregate::Count {
        target: Some(target()),
    };
    assert_eq!(count.apply(&rows, &ids), Ok(Some(integer(3))));

    let count_all = Aggregate::Count { target: None };
    assert_eq!(count_all.apply(&rows, &ids), Ok(Some(integer(4))));
}

#[test]
fn group_concat_escalates_where_others_skip() {
    let rows = mixed_group();
    let ids = rows.ids();

    let concat = Aggregate::GroupConcat {
        target: target(),
        separator: Some(",".to_owned()),
        distinct: false,
    };
    assert!(matches!(
        concat.apply(&rows, &ids),
        Err(AggregateError::UndefinedConcatOperand { .. })
    ));

    let sample = Aggregate::Sample { target: target() };
    assert_eq!(sample.apply(&rows, &ids), Ok(Some(integer(1))));
}

#[test]
fn empty_groups_split_by_aggregate() {
    let rows = BindingMultiset::new(vec![x()]);
    let ids = rows.ids();

    // SUM defaults to zero, MIN/MAX/SAMPLE stay absent.
    let sum = Aggregate::Sum {
        target: target(),
        distinct: false,
    };
    assert_eq!(sum.apply(&rows, &ids), Ok(Some(integer(0))));

    let min = Aggregate::Min {
        target: target(),
        distinct: false,
    };
    assert_eq!(min.apply(&rows, &ids), Ok(None));

    let max = Aggregate::Max {
        target: target(),
        distinct: false,
    };
    assert_eq!(max.apply(&rows, &ids), Ok(None));

    let sample = Aggregate::Sample { target: target() };
    assert_eq!(sample.apply(&rows, &ids), Ok(None));
}

#[test]
fn aggregates_are_reusable_across_groups() {
    // One descriptor, two disjoint groups: no state may leak between calls.
    let mut rows = BindingMultiset::new(vec![x()]);
    let a = rows.push([(x(), integer(1))]);
    let b = rows.push([(x(), integer(2))]);
    let c = rows.push([(x(), integer(10))]);

    let sum = Aggregate::Sum {
        target: target(),
        distinct: false,
    };
    assert_eq!(sum.apply(&rows, &[a, b]), Ok(Some(integer(3))));
    assert_eq!(sum.apply(&rows, &[c]), Ok(Some(integer(10))));
    assert_eq!(sum.apply(&rows, &[a, b]), Ok(Some(integer(3))));
}
