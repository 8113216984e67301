use std::fmt;

use chrono::{DateTime, Utc};
use gridview::TableRow;
use serde::{Deserialize, Serialize};

use super::{Record, ResourceKind};
use crate::validation::{Validate, ValidationResult, Validator};

/// Marketplace approval state of a seller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellerStatus {
    Pending,
    Approved,
    Rejected,
    Suspended,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SellerStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Suspended => "Suspended",
            Self::Unknown => "",
        }
    }
}

impl fmt::Display for SellerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A marketplace seller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Seller {
    #[serde(alias = "_id")]
    pub id: String,
    pub store_name: Option<String>,
    pub owner_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: SellerStatus,
    pub is_active: Option<bool>,
    pub product_count: Option<i64>,
    pub joined_at: Option<DateTime<Utc>>,
}

impl TableRow for Seller {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.store_name.clone().unwrap_or_else(|| self.id.clone())
    }
}

impl Record for Seller {
    type Draft = SellerDraft;
    const KIND: ResourceKind = ResourceKind::Sellers;

    fn enabled(&self) -> Option<bool> {
        self.is_active
    }
}

/// Create/update payload for [`Seller`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerDraft {
    pub store_name: String,
    pub owner_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: SellerStatus,
    pub is_active: bool,
}

impl From<&Seller> for SellerDraft {
    fn from(seller: &Seller) -> Self {
        Self {
            store_name: seller.store_name.clone().unwrap_or_default(),
            owner_name: seller.owner_name.clone().unwrap_or_default(),
            email: seller.email.clone().unwrap_or_default(),
            phone: seller.phone.clone(),
            status: seller.status,
            is_active: seller.is_active.unwrap_or(true),
        }
    }
}

impl Validate for SellerDraft {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .field("storeName", self.store_name.as_str())
            .required("Store name is required")
            .min_length(2, "Store name must be at least 2 characters")
            .max_length(80, "Store name must be at most 80 characters")
            .field("ownerName", self.owner_name.as_str())
            .required("Owner name is required")
            .field("email", self.email.as_str())
            .required("Email is required")
            .email("Invalid email format")
            .field("phone", self.phone.clone())
            .pattern(r"^\+?[0-9 ()-]{6,20}$", "Invalid phone number")
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SellerDraft {
        SellerDraft {
            store_name: "Acme Store".into(),
            owner_name: "Sam Lee".into(),
            email: "sam@acme.example".into(),
            phone: Some("+1 (555) 010-2000".into()),
            status: SellerStatus::Approved,
            is_active: true,
        }
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft().validate().is_valid());

        let bad = SellerDraft {
            email: "sam at acme".into(),
            phone: Some("call me".into()),
            ..draft()
        };
        let fields: Vec<String> = bad.validate().errors().iter().map(|e| e.field.clone()).collect();
        assert_eq!(fields, ["email", "phone"]);
    }

    #[test]
    fn test_status_serde() {
        let seller: Seller =
            serde_json::from_str(r#"{"id": "s1", "storeName": "Acme", "status": "suspended"}"#)
                .unwrap();
        assert_eq!(seller.status, SellerStatus::Suspended);
        assert_eq!(seller.title(), "Acme");
        assert_eq!(seller.enabled(), None);
    }
}
