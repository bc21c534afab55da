use chrono::{DateTime, Utc};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use catalog_core::{DomainError, DomainResult, ValueObject};

use crate::money::Money;

/// Percentage discount valid over the half-open window `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Discount {
    percent: BigRational,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ValueObject for Discount {}

impl Discount {
    /// Build a discount. `percent` must lie in `(0, 100]` and `end` must be
    /// strictly after `start`. Instants are normalized to UTC.
    pub fn new(
        percent: BigRational,
        start: impl Into<DateTime<Utc>>,
        end: impl Into<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        if !percent.is_positive() || percent > hundred() {
            return Err(DomainError::InvalidDiscountPercent);
        }
        let start = start.into();
        let end = end.into();
        if end <= start {
            return Err(DomainError::InvalidDiscountPeriod);
        }
        Ok(Self {
            percent,
            start,
            end,
        })
    }

    pub fn percent(&self) -> &BigRational {
        &self.percent
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Start inclusive, end exclusive.
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    /// Whether the two half-open windows intersect.
    pub fn overlaps(&self, other: &Discount) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// `percent / 100`, always in `(0, 1]`.
    pub fn rate(&self) -> BigRational {
        &self.percent / hundred()
    }

    /// `base - base * rate`, exactly.
    ///
    /// Never negative because the rate never exceeds one.
    pub fn apply_to(&self, base: &Money) -> Money {
        let off = base.amount() * self.rate();
        let remaining = base.amount() - off;
        debug_assert!(remaining >= BigRational::zero() && self.rate() <= BigRational::one());
        Money::from_ratio_unchecked(remaining)
    }
}

fn hundred() -> BigRational {
    BigRational::from_integer(100.into())
}
