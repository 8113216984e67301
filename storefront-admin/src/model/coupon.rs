use std::fmt;

use chrono::{DateTime, Utc};
use gridview::{CellValue, TableRow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Record, ResourceKind, ScheduleStatus, ends_after};
use crate::validation::{Validate, ValidationResult, Validator};

/// How a coupon's discount value is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Percentage => "Percentage",
            Self::Fixed => "Fixed",
            Self::Unknown => "",
        })
    }
}

/// A discount code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Coupon {
    #[serde(alias = "_id")]
    pub id: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Option<Decimal>,
    pub min_purchase: Option<Decimal>,
    /// Total redemptions allowed; unlimited when absent.
    pub max_uses: Option<i64>,
    pub used_count: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

impl Coupon {
    pub fn status(&self, now: DateTime<Utc>) -> ScheduleStatus {
        ScheduleStatus::at(self.is_active, self.start_date, self.end_date, now)
    }

    /// All allowed redemptions have been used.
    pub fn is_exhausted(&self) -> bool {
        match (self.max_uses, self.used_count) {
            (Some(max), Some(used)) => used >= max,
            _ => false,
        }
    }

    /// Human-readable discount, e.g. `15%` or `5.00 off`.
    pub fn discount_label(&self) -> CellValue {
        match (self.discount_type, self.discount_value) {
            (DiscountType::Percentage, Some(v)) => format!("{}%", v.normalize()).into(),
            (DiscountType::Fixed, Some(v)) => format!("{:.2} off", v).into(),
            (_, Some(v)) => v.into(),
            (_, None) => CellValue::Empty,
        }
    }
}

impl TableRow for Coupon {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.code.clone().unwrap_or_else(|| self.id.clone())
    }
}

impl Record for Coupon {
    type Draft = CouponDraft;
    const KIND: ResourceKind = ResourceKind::Coupons;

    fn enabled(&self) -> Option<bool> {
        self.is_active
    }
}

/// Create/update payload for [`Coupon`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponDraft {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_purchase: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<&Coupon> for CouponDraft {
    fn from(coupon: &Coupon) -> Self {
        Self {
            code: coupon.code.clone().unwrap_or_default(),
            description: coupon.description.clone(),
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            min_purchase: coupon.min_purchase,
            max_uses: coupon.max_uses,
            start_date: coupon.start_date,
            end_date: coupon.end_date,
            is_active: coupon.is_active.unwrap_or(true),
        }
    }
}

impl Validate for CouponDraft {
    fn validate(&self) -> ValidationResult {
        let value_max = match self.discount_type {
            DiscountType::Percentage => Some(Decimal::ONE_HUNDRED.into()),
            _ => None,
        };
        Validator::new()
            .field("code", self.code.as_str())
            .required("Code is required")
            .min_length(3, "Code must be at least 3 characters")
            .max_length(32, "Code must be at most 32 characters")
            .pattern(
                "^[A-Z0-9_-]+$",
                "Code may only contain upper-case letters, digits, '-' and '_'",
            )
            .field("discountType", self.discount_type.to_string())
            .required("Discount type is required")
            .field("discountValue", self.discount_value)
            .required("Discount value is required")
            .range(
                Some(Decimal::new(1, 2).into()),
                value_max,
                "Discount value is out of range",
            )
            .field("minPurchase", self.min_purchase)
            .range(Some(Decimal::ZERO.into()), None, "Minimum purchase cannot be negative")
            .field("maxUses", self.max_uses)
            .range(Some(1i64.into()), None, "Maximum uses must be at least 1")
            .field("endDate", self.end_date)
            .custom(
                ends_after(self.start_date),
                "End date must be after the start date",
            )
            .validate()
    }
}
