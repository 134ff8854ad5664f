use std::fmt;
use std::iter::Sum;

/// Money in integer minor units (cents).
///
/// Decimal values only exist at the boundary (`from_decimal`, `parse`,
/// `to_decimal`, `Display`); every sum inside the matcher is integer arithmetic.
/// Arithmetic saturates at the `i64` range instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cents(i64);

impl Cents {
    const SCALE: i64 = 100;

    pub const ZERO: Cents = Cents(0);

    /// Largest amount accepted as a target or entry: 10^13 currency units.
    /// A hundred of these still sum well inside `i64`.
    pub const MAX: Cents = Cents(1_000_000_000_000_000);

    /// `round(value * 100)`, half away from zero.
    pub fn from_decimal(value: f64) -> Self {
        Cents((value * Self::SCALE as f64).round() as i64)
    }

    pub fn from_cents(value: i64) -> Self {
        Cents(value)
    }

    /// Parse a decimal string such as `"1234.5"` or `" 80 "`.
    ///
    /// Returns `None` for empty, non-numeric or non-finite input.
    pub fn parse(input: &str) -> Option<Self> {
        let value: f64 = input.trim().parse().ok()?;
        value.is_finite().then(|| Self::from_decimal(value))
    }

    pub fn as_cents(self) -> i64 {
        self.0
    }

    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    pub fn abs_diff(self, other: Cents) -> Cents {
        Cents(self.0.abs_diff(other.0).min(i64::MAX as u64) as i64)
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / Self::SCALE as u64;
        let frac = abs % Self::SCALE as u64;
        write!(f, "{sign}{whole}.{frac:02}")
    }
}

impl std::ops::Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Cents(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub for Cents {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Cents(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::AddAssign for Cents {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl std::ops::SubAssign for Cents {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Cents::ZERO, |acc, c| acc + c)
    }
}
