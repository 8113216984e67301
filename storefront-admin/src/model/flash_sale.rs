use chrono::{DateTime, Utc};
use gridview::{CellValue, TableRow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Record, ResourceKind, ScheduleStatus, ends_after};
use crate::validation::{Validate, ValidationResult, Validator};

/// A time-boxed price cut on one product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlashSale {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub sale_price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    /// Units offered at the sale price.
    pub quantity: Option<i64>,
    pub sold_count: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

impl FlashSale {
    pub fn status(&self, now: DateTime<Utc>) -> ScheduleStatus {
        ScheduleStatus::at(self.is_active, self.start_time, self.end_time, now)
    }

    /// Percentage off the original price, rounded to whole percent.
    pub fn discount_percent(&self) -> Option<Decimal> {
        let (sale, original) = (self.sale_price?, self.original_price?);
        if original.is_zero() {
            return None;
        }
        Some(((original - sale) / original * Decimal::ONE_HUNDRED).round())
    }

    /// Units still available, never negative.
    pub fn remaining(&self) -> Option<i64> {
        let quantity = self.quantity?;
        Some((quantity - self.sold_count.unwrap_or(0)).max(0))
    }

    /// Share of the offered units already sold, `0..=100`.
    pub fn sold_percent(&self) -> CellValue {
        match (self.quantity, self.sold_count) {
            (Some(q), Some(s)) if q > 0 => ((s.min(q) * 100) / q).into(),
            _ => CellValue::Empty,
        }
    }
}

impl TableRow for FlashSale {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.product_name.clone())
            .unwrap_or_else(|| self.id.clone())
    }
}

impl Record for FlashSale {
    type Draft = FlashSaleDraft;
    const KIND: ResourceKind = ResourceKind::FlashSales;

    fn enabled(&self) -> Option<bool> {
        self.is_active
    }
}

/// Create/update payload for [`FlashSale`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashSaleDraft {
    pub name: String,
    pub product_id: String,
    pub sale_price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<&FlashSale> for FlashSaleDraft {
    fn from(sale: &FlashSale) -> Self {
        Self {
            name: sale.name.clone().unwrap_or_default(),
            product_id: sale.product_id.clone().unwrap_or_default(),
            sale_price: sale.sale_price,
            original_price: sale.original_price,
            quantity: sale.quantity,
            start_time: sale.start_time,
            end_time: sale.end_time,
            is_active: sale.is_active.unwrap_or(true),
        }
    }
}

impl Validate for FlashSaleDraft {
    fn validate(&self) -> ValidationResult {
        let original = self.original_price;
        Validator::new()
            .field("name", self.name.as_str())
            .required("Name is required")
            .max_length(120, "Name must be at most 120 characters")
            .field("productId", self.product_id.as_str())
            .required("Product is required")
            .field("salePrice", self.sale_price)
            .required("Sale price is required")
            .range(Some(Decimal::ZERO.into()), None, "Sale price cannot be negative")
            .custom(
                move |sale| match (sale.as_decimal(), original) {
                    (Some(sale), Some(original)) => sale < original,
                    _ => true,
                },
                "Sale price must be below the original price",
            )
            .field("quantity", self.quantity)
            .range(Some(1i64.into()), None, "Quantity must be at least 1")
            .field("startTime", self.start_time)
            .required("Start time is required")
            .field("endTime", self.end_time)
            .required("End time is required")
            .custom(
                ends_after(self.start_time),
                "End time must be after the start time",
            )
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sale() -> FlashSale {
        FlashSale {
            id: "f1".into(),
            product_name: Some("Sneakers".into()),
            sale_price: Some(Decimal::from(75)),
            original_price: Some(Decimal::from(100)),
            quantity: Some(40),
            sold_count: Some(10),
            ..Default::default()
        }
    }

    #[test]
    fn test_derived_figures() {
        let sale = sale();
        assert_eq!(sale.discount_percent(), Some(Decimal::from(25)));
        assert_eq!(sale.remaining(), Some(30));
        assert_eq!(sale.sold_percent(), CellValue::Int(25));
        assert_eq!(sale.title(), "Sneakers");
    }

    #[test]
    fn test_oversold_never_negative() {
        let sale = FlashSale {
            sold_count: Some(50),
            ..sale()
        };
        assert_eq!(sale.remaining(), Some(0));
        assert_eq!(sale.sold_percent(), CellValue::Int(100));
    }

    #[test]
    fn test_draft_validation() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let draft = FlashSaleDraft {
            name: "Midsummer".into(),
            product_id: "p1".into(),
            sale_price: Some(Decimal::from(75)),
            original_price: Some(Decimal::from(100)),
            quantity: Some(40),
            start_time: Some(start),
            end_time: Some(start + chrono::Duration::hours(6)),
            is_active: true,
        };
        assert!(draft.validate().is_valid());

        let pricier = FlashSaleDraft {
            sale_price: Some(Decimal::from(120)),
            ..draft.clone()
        };
        assert_eq!(pricier.validate().first_error().unwrap().field, "salePrice");

        let open_ended = FlashSaleDraft {
            end_time: None,
            ..draft
        };
        assert_eq!(open_ended.validate().first_error().unwrap().field, "endTime");
    }
}
