//! Element quantities.
//!
//! A [`Quantity`] remembers whether it was written as a plain count or as a
//! decimal multiplier. Arithmetic keeps a result integral only while every
//! operand is integral, and [`Display`](fmt::Display) always writes decimals
//! with a decimal point so that the distinction survives being written out
//! and read back.

use std::fmt;

/// The amount of one element in a formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    /// A whole count, e.g. the `4` in `CH4`.
    Integer(u64),
    /// A fractional or decimal-written amount, e.g. the `2.5` in `Fe2.5O`.
    Decimal(f64),
}

impl Quantity {
    pub const ZERO: Quantity = Quantity::Integer(0);
    pub const ONE: Quantity = Quantity::Integer(1);

    /// A decimal quantity, or `None` if `x` is NaN or infinite.
    pub fn decimal(x: f64) -> Option<Quantity> {
        x.is_finite().then_some(Quantity::Decimal(x))
    }

    /// True for `1` and `1.0`; such quantities are never written out.
    pub fn is_one(self) -> bool {
        match self {
            Self::Integer(n) => n == 1,
            Self::Decimal(x) => x == 1.0,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Self::Integer(n) => n == 0,
            Self::Decimal(x) => x == 0.0,
        }
    }

    /// True for finite quantities greater than zero, the only ones a parsed
    /// formula holds.
    pub fn is_positive(self) -> bool {
        match self {
            Self::Integer(n) => n > 0,
            Self::Decimal(x) => x.is_finite() && x > 0.0,
        }
    }

    pub fn is_decimal(self) -> bool {
        matches!(self, Self::Decimal(_))
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Decimal(x) => x,
        }
    }

    /// Sum of two quantities, or `None` if the sum is out of range.
    pub fn checked_add(self, rhs: Quantity) -> Option<Quantity> {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => a.checked_add(b).map(Self::Integer),
            _ => Self::decimal(self.as_f64() + rhs.as_f64()),
        }
    }

    /// Product of two quantities, or `None` if the product is out of range.
    pub fn checked_mul(self, rhs: Quantity) -> Option<Quantity> {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => a.checked_mul(b).map(Self::Integer),
            _ => Self::decimal(self.as_f64() * rhs.as_f64()),
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u64> for Quantity {
    fn from(n: u64) -> Self {
        Self::Integer(n)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(x) => {
                let text = x.to_string();
                if text.contains('.') || !x.is_finite() {
                    f.write_str(&text)
                } else {
                    write!(f, "{text}.0")
                }
            }
        }
    }
}
