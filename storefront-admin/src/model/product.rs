use std::fmt;

use chrono::{DateTime, Utc};
use gridview::TableRow;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Record, ResourceKind, is_http_url};
use crate::validation::{Validate, ValidationResult, Validator};

/// Stock at or below this count is reported as low.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Availability of a product as shown in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
    Inactive,
}

impl StockStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::InStock => "In stock",
            Self::LowStock => "Low stock",
            Self::OutOfStock => "Out of stock",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A catalogue product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
    pub seller_name: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Availability; unknown stock counts as in stock.
    pub fn stock_status(&self) -> StockStatus {
        if self.is_active == Some(false) {
            return StockStatus::Inactive;
        }
        match self.stock {
            Some(n) if n <= 0 => StockStatus::OutOfStock,
            Some(n) if n <= LOW_STOCK_THRESHOLD => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }
}

impl TableRow for Product {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.clone())
    }
}

impl Record for Product {
    type Draft = ProductDraft;
    const KIND: ResourceKind = ResourceKind::Products;

    fn enabled(&self) -> Option<bool> {
        self.is_active
    }
}

/// Create/update payload for [`Product`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub category: String,
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone().unwrap_or_default(),
            sku: product.sku.clone(),
            category: product.category.clone().unwrap_or_default(),
            price: product.price,
            stock: product.stock,
            image_url: product.image_url.clone(),
            is_active: product.is_active.unwrap_or(true),
        }
    }
}

impl Validate for ProductDraft {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .field("name", self.name.as_str())
            .required("Name is required")
            .max_length(200, "Name must be at most 200 characters")
            .field("sku", self.sku.clone())
            .pattern(
                "^[A-Za-z0-9-]+$",
                "SKU may only contain letters, digits and '-'",
            )
            .field("category", self.category.as_str())
            .required("Category is required")
            .field("price", self.price)
            .required("Price is required")
            .range(Some(Decimal::ZERO.into()), None, "Price cannot be negative")
            .field("stock", self.stock)
            .required("Stock is required")
            .range(Some(0i64.into()), None, "Stock cannot be negative")
            .field("imageUrl", self.image_url.clone())
            .custom(is_http_url, "Image URL must be an http(s) URL")
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_status() {
        let product = |stock, is_active| Product {
            stock,
            is_active,
            ..Default::default()
        };
        assert_eq!(product(Some(0), None).stock_status(), StockStatus::OutOfStock);
        assert_eq!(product(Some(5), None).stock_status(), StockStatus::LowStock);
        assert_eq!(product(Some(6), Some(true)).stock_status(), StockStatus::InStock);
        assert_eq!(product(None, None).stock_status(), StockStatus::InStock);
        assert_eq!(product(Some(50), Some(false)).stock_status(), StockStatus::Inactive);
    }

    #[test]
    fn test_price_from_string_or_number() {
        let a: Product = serde_json::from_str(r#"{"id": "p1", "price": "19.99"}"#).unwrap();
        let b: Product = serde_json::from_str(r#"{"id": "p1", "price": 19.99}"#).unwrap();
        assert_eq!(a.price, Some(Decimal::new(1999, 2)));
        assert_eq!(a.price, b.price);
    }

    #[test]
    fn test_draft_validation() {
        let draft = ProductDraft {
            name: "Sneakers".into(),
            sku: Some("SNK-001".into()),
            category: "Shoes".into(),
            price: Some(Decimal::new(5999, 2)),
            stock: Some(12),
            is_active: true,
            ..Default::default()
        };
        assert!(draft.validate().is_valid());

        let negative = ProductDraft {
            stock: Some(-1),
            ..draft
        };
        assert_eq!(negative.validate().first_error().unwrap().message, "Stock cannot be negative");
    }
}
