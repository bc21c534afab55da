//! `products` table.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use num_rational::BigRational;
use serde_json::Value as JsonValue;

use catalog_products::{
    Discount, Money, Product, ProductField, ProductId, ProductSnapshot, ProductStatus,
};

use super::{Row, i64_col, opt_str_col, opt_time_col, str_col, timestamp};
use crate::contracts::RepositoryError;

pub const TABLE: &str = "products";

pub const PRODUCT_ID: &str = "product_id";
pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const CATEGORY: &str = "category";
pub const BASE_PRICE_NUMERATOR: &str = "base_price_numerator";
pub const BASE_PRICE_DENOMINATOR: &str = "base_price_denominator";
pub const DISCOUNT_PERCENT: &str = "discount_percent";
pub const DISCOUNT_START_DATE: &str = "discount_start_date";
pub const DISCOUNT_END_DATE: &str = "discount_end_date";
pub const STATUS: &str = "status";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";
pub const ARCHIVED_AT: &str = "archived_at";

/// Full row for a new product.
pub fn insert_row(product: &Product, now: DateTime<Utc>) -> Result<Row, RepositoryError> {
    let (numerator, denominator) = price_fraction("base price", product.base_price())?;

    let mut row = Row::new();
    row.insert(PRODUCT_ID.into(), product.product_id().as_str().into());
    row.insert(NAME.into(), product.name().into());
    row.insert(DESCRIPTION.into(), product.description().into());
    row.insert(CATEGORY.into(), product.category().into());
    row.insert(BASE_PRICE_NUMERATOR.into(), numerator.into());
    row.insert(BASE_PRICE_DENOMINATOR.into(), denominator.into());
    put_discount(&mut row, product.base_price(), product.discount())?;
    row.insert(STATUS.into(), product.status().as_str().into());
    row.insert(CREATED_AT.into(), timestamp(now));
    row.insert(UPDATED_AT.into(), timestamp(now));
    row.insert(
        ARCHIVED_AT.into(),
        product.archived_at().map(timestamp).unwrap_or(JsonValue::Null),
    );
    Ok(row)
}

/// Partial row holding only the dirty columns, keyed by `product_id`.
///
/// `Ok(None)` when nothing beyond the key would be written.
pub fn update_row(product: &Product, now: DateTime<Utc>) -> Result<Option<Row>, RepositoryError> {
    let changes = product.changes();
    let mut row = Row::new();
    row.insert(PRODUCT_ID.into(), product.product_id().as_str().into());

    for field in changes.dirty_fields() {
        match field {
            ProductField::Name => {
                row.insert(NAME.into(), product.name().into());
            }
            ProductField::Description => {
                row.insert(DESCRIPTION.into(), product.description().into());
            }
            ProductField::Category => {
                row.insert(CATEGORY.into(), product.category().into());
            }
            ProductField::Status => {
                row.insert(STATUS.into(), product.status().as_str().into());
            }
            ProductField::Discount => put_discount(&mut row, product.base_price(), product.discount())?,
            ProductField::ArchivedAt => {
                row.insert(
                    ARCHIVED_AT.into(),
                    product.archived_at().map(timestamp).unwrap_or(JsonValue::Null),
                );
            }
        }
    }

    if row.len() == 1 {
        return Ok(None);
    }
    row.insert(UPDATED_AT.into(), timestamp(now));
    Ok(Some(row))
}

/// `money` as an i64 numerator/denominator pair.
pub fn price_fraction(what: &str, money: &Money) -> Result<(i64, i64), RepositoryError> {
    money.to_fraction_i64().ok_or_else(|| {
        RepositoryError::Encode(format!("{what} {money} does not fit 64-bit numerator/denominator"))
    })
}

/// Discount columns; all three null when no discount is attached.
///
/// Fails with `Encode` when the discounted price does not fit i64 parts.
fn put_discount(row: &mut Row, base: &Money, discount: Option<&Discount>) -> Result<(), RepositoryError> {
    match discount {
        Some(d) => {
            price_fraction("discounted price", &d.apply_to(base))?;
            row.insert(DISCOUNT_PERCENT.into(), d.percent().to_string().into());
            row.insert(DISCOUNT_START_DATE.into(), timestamp(d.start()));
            row.insert(DISCOUNT_END_DATE.into(), timestamp(d.end()));
        }
        None => {
            row.insert(DISCOUNT_PERCENT.into(), JsonValue::Null);
            row.insert(DISCOUNT_START_DATE.into(), JsonValue::Null);
            row.insert(DISCOUNT_END_DATE.into(), JsonValue::Null);
        }
    }
    Ok(())
}

/// Rebuild the aggregate (clean, no events) from a stored row.
pub fn product_from_row(row: &Row) -> Result<Product, RepositoryError> {
    let id = ProductId::parse(str_col(row, PRODUCT_ID)?)
        .map_err(|e| RepositoryError::Corrupt(format!("column '{PRODUCT_ID}': {e}")))?;
    let base_price = Money::from_fraction(
        i64_col(row, BASE_PRICE_NUMERATOR)?,
        i64_col(row, BASE_PRICE_DENOMINATOR)?,
    )
    .map_err(|e| RepositoryError::Corrupt(format!("base price: {e}")))?;
    let status = ProductStatus::from_str(str_col(row, STATUS)?).map_err(RepositoryError::Corrupt)?;

    Ok(Product::hydrate(ProductSnapshot {
        id,
        name: str_col(row, NAME)?.to_string(),
        description: opt_str_col(row, DESCRIPTION)?.unwrap_or_default().to_string(),
        category: str_col(row, CATEGORY)?.to_string(),
        base_price,
        discount: discount_from_row(row)?,
        status,
        archived_at: opt_time_col(row, ARCHIVED_AT)?,
    }))
}

/// A discount is present only when all three columns are set.
fn discount_from_row(row: &Row) -> Result<Option<Discount>, RepositoryError> {
    let percent = opt_str_col(row, DISCOUNT_PERCENT)?;
    let start = opt_time_col(row, DISCOUNT_START_DATE)?;
    let end = opt_time_col(row, DISCOUNT_END_DATE)?;

    match (percent, start, end) {
        (Some(percent), Some(start), Some(end)) => {
            let percent = BigRational::from_str(percent).map_err(|e| {
                RepositoryError::Corrupt(format!("column '{DISCOUNT_PERCENT}': {e}"))
            })?;
            Discount::new(percent, start, end)
                .map(Some)
                .map_err(|e| RepositoryError::Corrupt(format!("discount: {e}")))
        }
        _ => Ok(None),
    }
}
