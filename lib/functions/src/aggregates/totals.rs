use rdf_reckon_model::{Decimal, Double, Float, Integer, Numeric, NumericKind};

/// Parallel running totals across the numeric promotion lattice.
///
/// Every tier at or above the maximum kind observed so far is kept up to
/// date, so when a later value promotes the accumulator, the totals of the
/// new tier already cover everything folded in before the promotion. The
/// final answer reads only the tier matching the max kind.
///
/// Integer and decimal addition is checked; an overflow makes [`add`] return
/// `None` instead of wrapping.
///
/// [`add`]: TieredTotals::add
#[derive(Debug)]
pub(super) struct TieredTotals {
    kind: NumericKind,
    integer: Integer,
    decimal: Decimal,
    float: Float,
    double: Double,
}

impl TieredTotals {
    pub(super) fn new() -> Self {
        Self {
            kind: NumericKind::NotANumber,
            integer: Integer::from(0),
            decimal: Decimal::from(0),
            float: Float::from(0.0),
            double: Double::from(0.0),
        }
    }

    /// The maximum kind observed so far.
    pub(super) fn kind(&self) -> NumericKind {
        self.kind
    }

    /// Folds one value into the totals.
    pub(super) fn add(&mut self, value: Numeric) -> Option<()> {
        self.kind = self.kind.max(value.kind());
        match self.kind {
            NumericKind::NotANumber => {
                unreachable!("a numeric value always promotes past NaN")
            }
            NumericKind::Integer => {
                // kind can only stay at Integer while every value is one.
                let Numeric::Integer(value) = value else {
                    return None;
                };
                self.integer = self.integer.checked_add(value)?;
                self.decimal = self.decimal.checked_add(Decimal::from(value))?;
                self.float = self.float + Float::from(value);
                self.double = self.double + Double::from(value);
            }
            NumericKind::Decimal => {
                let value = decimal_view(value)?;
                self.decimal = self.decimal.checked_add(value)?;
                self.float = self.float + Float::from(value);
                self.double = self.double + Double::from(value);
            }
            NumericKind::Float => {
                self.float = self.float + float_view(value)?;
                self.double = self.double + double_view(value);
            }
            NumericKind::Double => {
                self.double = self.double + double_view(value);
            }
        }
        Some(())
    }

    /// The running sum in the tier of the maximum observed kind, or `None`
    /// if no numeric value was folded in.
    pub(super) fn sum(&self) -> Option<Numeric> {
        match self.kind {
            NumericKind::NotANumber => None,
            NumericKind::Integer => Some(Numeric::Integer(self.integer)),
            NumericKind::Decimal => Some(Numeric::Decimal(self.decimal)),
            NumericKind::Float => Some(Numeric::Float(self.float)),
            NumericKind::Double => Some(Numeric::Double(self.double)),
        }
    }

    /// The tier-appropriate average over `count` values.
    ///
    /// The integer tier reports a decimal, per the SPARQL AVG definition.
    /// `None` on overflow or if no numeric value was folded in.
    pub(super) fn average(&self, count: i64) -> Option<Numeric> {
        match self.kind {
            NumericKind::NotANumber => None,
            NumericKind::Integer | NumericKind::Decimal => self
                .decimal
                .checked_div(Decimal::from(count))
                .map(Numeric::Decimal),
            NumericKind::Float => {
                Some(Numeric::Float(self.float / Float::from(Integer::from(count))))
            }
            NumericKind::Double => Some(Numeric::Double(
                self.double / Double::from(Integer::from(count)),
            )),
        }
    }
}

/// The decimal view of a value at or below the decimal tier.
fn decimal_view(value: Numeric) -> Option<Decimal> {
    match value {
        Numeric::Integer(value) => Some(Decimal::from(value)),
        Numeric::Decimal(value) => Some(value),
        Numeric::Float(_) | Numeric::Double(_) => None,
    }
}

/// The float view of a value at or below the float tier.
fn float_view(value: Numeric) -> Option<Float> {
    match value {
        Numeric::Integer(value) => Some(Float::from(value)),
        Numeric::Decimal(value) => Some(Float::from(value)),
        Numeric::Float(value) => Some(value),
        Numeric::Double(_) => None,
    }
}

fn double_view(value: Numeric) -> Double {
    match value {
        Numeric::Integer(value) => Double::from(value),
        Numeric::Decimal(value) => Double::from(value),
        Numeric::Float(value) => Double::from(value),
        Numeric::Double(value) => value,
    }
}
