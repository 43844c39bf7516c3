use crate::{Numeric, NumericPair, TypedValue};
use std::cmp::Ordering;

/// Total SPARQL ordering over typed values.
///
/// Values order first by type class (numerics before booleans, booleans
/// before strings, strings before date-times, IRIs and blank nodes last),
/// then naturally within a class. The order is total: NaN sorts before every
/// other float/double, and incomparable date-times fall back to their
/// canonical lexical forms, so sorting never panics.
pub fn sparql_cmp(a: &TypedValue, b: &TypedValue) -> Ordering {
    type_class(a)
        .cmp(&type_class(b))
        .then_with(|| cmp_within_class(a, b))
}

fn type_class(value: &TypedValue) -> u8 {
    match value {
        TypedValue::NumericLiteral(_) => 0,
        TypedValue::BooleanLiteral(_) => 1,
        TypedValue::SimpleLiteral(_) => 2,
        TypedValue::LanguageStringLiteral { .. } => 3,
        TypedValue::DateTimeLiteral(_) => 4,
        TypedValue::OtherLiteral(_) => 5,
        TypedValue::NamedNode(_) => 6,
        TypedValue::BlankNode(_) => 7,
    }
}

fn cmp_within_class(a: &TypedValue, b: &TypedValue) -> Ordering {
    match (a, b) {
        (TypedValue::NumericLiteral(a), TypedValue::NumericLiteral(b)) => numeric_cmp(*a, *b),
        (TypedValue::BooleanLiteral(a), TypedValue::BooleanLiteral(b)) => {
            bool::from(*a).cmp(&bool::from(*b))
        }
        (TypedValue::SimpleLiteral(a), TypedValue::SimpleLiteral(b)) => a.cmp(b),
        (
            TypedValue::LanguageStringLiteral { value: av, language: al },
            TypedValue::LanguageStringLiteral { value: bv, language: bl },
        ) => av.cmp(bv).then_with(|| al.cmp(bl)),
        (TypedValue::DateTimeLiteral(a), TypedValue::DateTimeLiteral(b)) => a
            .partial_cmp(b)
            .unwrap_or_else(|| a.to_string().cmp(&b.to_string())),
        (TypedValue::OtherLiteral(a), TypedValue::OtherLiteral(b)) => a
            .datatype()
            .as_str()
            .cmp(b.datatype().as_str())
            .then_with(|| a.value().cmp(b.value())),
        (TypedValue::NamedNode(a), TypedValue::NamedNode(b)) => a.as_str().cmp(b.as_str()),
        (TypedValue::BlankNode(a), TypedValue::BlankNode(b)) => a.as_str().cmp(b.as_str()),
        // Different type classes were already decided by the caller.
        _ => Ordering::Equal,
    }
}

/// Total order over numerics: operands widen to their join, NaN first.
pub fn numeric_cmp(a: Numeric, b: Numeric) -> Ordering {
    match NumericPair::with_casts_from(a, b) {
        NumericPair::Integer(lhs, rhs) => lhs.cmp(&rhs),
        NumericPair::Decimal(lhs, rhs) => lhs.cmp(&rhs),
        NumericPair::Float(lhs, rhs) => float_total_cmp(f64::from(f32::from(lhs)), f64::from(f32::from(rhs))),
        NumericPair::Double(lhs, rhs) => float_total_cmp(f64::from(lhs), f64::from(rhs)),
    }
}

fn float_total_cmp(lhs: f64, rhs: f64) -> Ordering {
    match (lhs.is_nan(), rhs.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal),
    }
}
