use oxsdatatypes::{Decimal, Double, Float, Integer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

/// Position in the numeric promotion lattice.
///
/// Combining two operands yields the maximum of their kinds. [`NotANumber`]
/// is the bottom element: the kind of an accumulator that has not seen a
/// numeric value yet.
///
/// [`NotANumber`]: NumericKind::NotANumber
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericKind {
    NotANumber,
    Integer,
    Decimal,
    Float,
    Double,
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumericKind::NotANumber => "NaN",
            NumericKind::Integer => "integer",
            NumericKind::Decimal => "decimal",
            NumericKind::Float => "float",
            NumericKind::Double => "double",
        })
    }
}

/// The value of a numeric literal.
#[derive(Copy, Clone, Debug)]
pub enum Numeric {
    Integer(Integer),
    Decimal(Decimal),
    Float(Float),
    Double(Double),
}

impl Numeric {
    /// The position of this value in the promotion lattice.
    #[must_use]
    pub fn kind(&self) -> NumericKind {
        match self {
            Numeric::Integer(_) => NumericKind::Integer,
            Numeric::Decimal(_) => NumericKind::Decimal,
            Numeric::Float(_) => NumericKind::Float,
            Numeric::Double(_) => NumericKind::Double,
        }
    }

    #[must_use]
    pub fn format_value(&self) -> String {
        match self {
            Numeric::Integer(value) => value.to_string(),
            Numeric::Decimal(value) => value.to_string(),
            Numeric::Float(value) => value.to_string(),
            Numeric::Double(value) => value.to_string(),
        }
    }

    #[must_use]
    pub fn to_be_bytes(self) -> Box<[u8]> {
        match self {
            Numeric::Integer(int) => int.to_be_bytes().into(),
            Numeric::Decimal(decimal) => decimal.to_be_bytes().into(),
            Numeric::Float(float) => float.to_be_bytes().into(),
            Numeric::Double(double) => double.to_be_bytes().into(),
        }
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(lhs), Self::Integer(rhs)) => lhs == rhs,
            (Self::Decimal(lhs), Self::Decimal(rhs)) => lhs == rhs,
            (Self::Float(lhs), Self::Float(rhs)) => lhs == rhs,
            (Self::Double(lhs), Self::Double(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl Eq for Numeric {}

impl Hash for Numeric {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Numeric::Integer(int) => int.hash(state),
            Numeric::Decimal(decimal) => decimal.hash(state),
            Numeric::Float(float) => float.to_be_bytes().hash(state),
            Numeric::Double(double) => double.to_be_bytes().hash(state),
        }
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match NumericPair::with_casts_from(*self, *other) {
            NumericPair::Integer(lhs, rhs) => Some(lhs.cmp(&rhs)),
            NumericPair::Decimal(lhs, rhs) => Some(lhs.cmp(&rhs)),
            NumericPair::Float(lhs, rhs) => lhs.partial_cmp(&rhs),
            NumericPair::Double(lhs, rhs) => lhs.partial_cmp(&rhs),
        }
    }
}

impl From<Integer> for Numeric {
    fn from(value: Integer) -> Self {
        Numeric::Integer(value)
    }
}

impl From<Decimal> for Numeric {
    fn from(value: Decimal) -> Self {
        Numeric::Decimal(value)
    }
}

impl From<Float> for Numeric {
    fn from(value: Float) -> Self {
        Numeric::Float(value)
    }
}

impl From<Double> for Numeric {
    fn from(value: Double) -> Self {
        Numeric::Double(value)
    }
}

/// A pair of numeric operands widened to their join in the promotion lattice.
pub enum NumericPair {
    Integer(Integer, Integer),
    Decimal(Decimal, Decimal),
    Float(Float, Float),
    Double(Double, Double),
}

impl NumericPair {
    pub fn with_casts_from(lhs: Numeric, rhs: Numeric) -> NumericPair {
        match (lhs, rhs) {
            (Numeric::Integer(lhs), Numeric::Integer(rhs)) => NumericPair::Integer(lhs, rhs),
            (Numeric::Integer(lhs), Numeric::Decimal(rhs)) => {
                NumericPair::Decimal(Decimal::from(lhs), rhs)
            }
            (Numeric::Integer(lhs), Numeric::Float(rhs)) => NumericPair::Float(lhs.into(), rhs),
            (Numeric::Integer(lhs), Numeric::Double(rhs)) => NumericPair::Double(lhs.into(), rhs),

            (Numeric::Decimal(lhs), Numeric::Integer(rhs)) => {
                NumericPair::Decimal(lhs, Decimal::from(rhs))
            }
            (Numeric::Decimal(lhs), Numeric::Decimal(rhs)) => NumericPair::Decimal(lhs, rhs),
            (Numeric::Decimal(lhs), Numeric::Float(rhs)) => NumericPair::Float(lhs.into(), rhs),
            (Numeric::Decimal(lhs), Numeric::Double(rhs)) => NumericPair::Double(lhs.into(), rhs),

            (Numeric::Float(lhs), Numeric::Integer(rhs)) => NumericPair::Float(lhs, rhs.into()),
            (Numeric::Float(lhs), Numeric::Decimal(rhs)) => NumericPair::Float(lhs, rhs.into()),
            (Numeric::Float(lhs), Numeric::Float(rhs)) => NumericPair::Float(lhs, rhs),
            (Numeric::Float(lhs), Numeric::Double(rhs)) => NumericPair::Double(lhs.into(), rhs),

            (Numeric::Double(lhs), Numeric::Integer(rhs)) => NumericPair::Double(lhs, rhs.into()),
            (Numeric::Double(lhs), Numeric::Decimal(rhs)) => NumericPair::Double(lhs, rhs.into()),
            (Numeric::Double(lhs), Numeric::Float(rhs)) => NumericPair::Double(lhs, rhs.into()),
            (Numeric::Double(lhs), Numeric::Double(rhs)) => NumericPair::Double(lhs, rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_lattice_is_ordered() {
        assert!(NumericKind::NotANumber < NumericKind::Integer);
        assert!(NumericKind::Integer < NumericKind::Decimal);
        assert!(NumericKind::Decimal < NumericKind::Float);
        assert!(NumericKind::Float < NumericKind::Double);
    }

    #[test]
    fn pair_widens_to_join() {
        let pair = NumericPair::with_casts_from(
            Numeric::Integer(Integer::from(1)),
            Numeric::Decimal(Decimal::from(2)),
        );
        assert!(matches!(pair, NumericPair::Decimal(_, _)));

        let pair = NumericPair::with_casts_from(
            Numeric::Float(Float::from(1.0)),
            Numeric::Double(Double::from(2.0)),
        );
        assert!(matches!(pair, NumericPair::Double(_, _)));
    }

    #[test]
    fn cross_kind_values_are_not_equal() {
        assert_ne!(
            Numeric::Integer(Integer::from(1)),
            Numeric::Decimal(Decimal::from(1))
        );
    }

    #[test]
    fn comparison_widens() {
        let lhs = Numeric::Integer(Integer::from(2));
        let rhs = Numeric::Double(Double::from(2.5));
        assert_eq!(lhs.partial_cmp(&rhs), Some(Ordering::Less));
    }
}
