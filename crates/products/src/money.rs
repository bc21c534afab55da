use core::fmt;
use core::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use catalog_core::{DomainError, DomainResult, ValueObject};

/// Exact, non-negative monetary amount.
///
/// Backed by an arbitrary-precision rational, so no step of a price
/// computation ever rounds. Arithmetic returns new values; a result that would
/// go negative is rejected instead of clamped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    amount: BigRational,
}

impl ValueObject for Money {}

impl Money {
    pub fn zero() -> Self {
        Self {
            amount: BigRational::zero(),
        }
    }

    pub fn from_ratio(amount: BigRational) -> DomainResult<Self> {
        if amount.is_negative() {
            return Err(DomainError::InvalidMoney);
        }
        Ok(Self { amount })
    }

    /// `numerator / denominator`, reduced. Fails on a zero denominator or a
    /// negative value.
    pub fn from_fraction(numerator: i64, denominator: i64) -> DomainResult<Self> {
        if denominator == 0 {
            return Err(DomainError::InvalidMoney);
        }
        Self::from_ratio(BigRational::new(
            BigInt::from(numerator),
            BigInt::from(denominator),
        ))
    }

    pub fn amount(&self) -> &BigRational {
        &self.amount
    }

    /// Reduced numerator/denominator, if both fit in an `i64`.
    pub fn to_fraction_i64(&self) -> Option<(i64, i64)> {
        Some((self.amount.numer().to_i64()?, self.amount.denom().to_i64()?))
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn sub(&self, other: &Money) -> DomainResult<Money> {
        Money::from_ratio(&self.amount - &other.amount)
    }

    /// Scale by a rational factor. A negative factor is rejected.
    pub fn mul(&self, factor: &BigRational) -> DomainResult<Money> {
        Money::from_ratio(&self.amount * factor)
    }

    /// Decimal rendering rounded (half away from zero) to `places` digits.
    pub fn to_decimal_string(&self, places: u32) -> String {
        decimal_string(&self.amount, places)
    }

    pub(crate) fn from_ratio_unchecked(amount: BigRational) -> Self {
        debug_assert!(!amount.is_negative());
        Self { amount }
    }
}

impl fmt::Display for Money {
    /// Rational form: `150`, `1/3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.amount, f)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = BigRational::from_str(s.trim()).map_err(|_| DomainError::InvalidMoney)?;
        Money::from_ratio(amount)
    }
}

/// Render a rational as a fixed-point decimal string.
pub fn decimal_string(value: &BigRational, places: u32) -> String {
    let scale = BigInt::from(10u32).pow(places);
    let scaled = (value * BigRational::from_integer(scale.clone())).round().to_integer();

    let sign = if scaled.is_negative() { "-" } else { "" };
    let scaled = scaled.abs();
    let int_part = &scaled / &scale;
    if places == 0 {
        return format!("{sign}{int_part}");
    }
    let frac_part = &scaled % &scale;
    format!(
        "{sign}{int_part}.{frac:0>width$}",
        frac = frac_part.to_string(),
        width = places as usize
    )
}
