use chrono::{DateTime, Utc};
use num_rational::BigRational;

use catalog_core::DomainError;
use catalog_products::Discount;

use super::{Persist, UseCaseDeps, UseCaseError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyDiscountRequest {
    pub product_id: String,
    pub percent_numerator: i64,
    pub percent_denominator: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ApplyDiscountRequest {
    /// Validated discount value; any range or period error surfaces before the
    /// product is loaded.
    fn discount(&self) -> Result<Discount, DomainError> {
        if self.percent_denominator == 0 {
            return Err(DomainError::InvalidDiscountPercent);
        }
        let percent = BigRational::new(self.percent_numerator.into(), self.percent_denominator.into());
        Discount::new(percent, self.start, self.end)
    }
}

pub struct ApplyDiscountInteractor {
    deps: UseCaseDeps,
}

impl ApplyDiscountInteractor {
    pub fn new(deps: UseCaseDeps) -> Self {
        Self { deps }
    }

    pub async fn execute(&self, req: ApplyDiscountRequest) -> Result<(), UseCaseError> {
        let discount = req.discount()?;
        let mut product = self.deps.load(&req.product_id).await?;
        product.apply_discount(Some(discount), self.deps.clock.now())?;
        self.deps.commit("apply_discount", &mut product, Persist::Update).await
    }
}
