use std::fmt;

use chrono::{DateTime, Utc};
use gridview::TableRow;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Record, ResourceKind};
use crate::validation::{Validate, ValidationResult, Validator};

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
    #[default]
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
            Self::Unknown => "",
        }
    }

    /// No further status changes are expected.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Refunded)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A customer order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    pub order_number: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub total: Option<Decimal>,
    pub item_count: Option<i64>,
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TableRow for Order {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        match &self.order_number {
            Some(number) => format!("#{number}"),
            None => self.id.clone(),
        }
    }
}

impl Record for Order {
    type Draft = OrderDraft;
    const KIND: ResourceKind = ResourceKind::Orders;
}

/// Status update payload for [`Order`]. Orders are placed by customers, so
/// the admin only moves them through fulfilment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

impl From<&Order> for OrderDraft {
    fn from(order: &Order) -> Self {
        Self {
            status: order.status,
            tracking_number: order.tracking_number.clone(),
        }
    }
}

impl Validate for OrderDraft {
    fn validate(&self) -> ValidationResult {
        let needs_tracking = matches!(self.status, OrderStatus::Shipped | OrderStatus::Delivered);
        Validator::new()
            .field("status", self.status.label())
            .required("Status is required")
            .field("trackingNumber", self.tracking_number.clone())
            .custom(
                move |v| !needs_tracking || !v.is_empty(),
                "Tracking number is required once an order has shipped",
            )
            .max_length(64, "Tracking number must be at most 64 characters")
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let order: Order = serde_json::from_str(
            r#"{"id": "o1", "orderNumber": "1001", "status": "shipped", "total": "42.50"}"#,
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.title(), "#1001");
        assert_eq!(order.total, Some(Decimal::new(4250, 2)));

        let odd: Order = serde_json::from_str(r#"{"id": "o2", "status": "on-hold"}"#).unwrap();
        assert_eq!(odd.status, OrderStatus::Unknown);
    }

    #[test]
    fn test_shipping_needs_tracking() {
        let draft = OrderDraft {
            status: OrderStatus::Shipped,
            tracking_number: None,
        };
        assert_eq!(
            draft.validate().first_error().unwrap().field,
            "trackingNumber"
        );
        let draft = OrderDraft {
            tracking_number: Some("1Z999".into()),
            ..draft
        };
        assert!(draft.validate().is_valid());
        assert!(OrderDraft::default().validate().is_invalid());
    }
}
