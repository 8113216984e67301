//! Storefront records and their drafts.
//!
//! Records mirror what the backend returns. Every field except the id is
//! optional so that partial payloads still deserialize; missing values show
//! up as empty cells.

mod banner;
mod coupon;
mod flash_sale;
mod order;
mod product;
mod seller;
mod status;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use gridview::{CellValue, TableRow};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use banner::{Banner, BannerDraft};
pub use coupon::{Coupon, CouponDraft, DiscountType};
pub use flash_sale::{FlashSale, FlashSaleDraft};
pub use order::{Order, OrderDraft, OrderStatus};
pub use product::{Product, ProductDraft, StockStatus};
pub use seller::{Seller, SellerDraft, SellerStatus};
pub use status::ScheduleStatus;

use crate::error::Error;
use crate::validation::Validate;

/// A record type served by one backend collection.
pub trait Record: TableRow + Serialize + DeserializeOwned + fmt::Debug {
    /// Payload accepted by create and update.
    type Draft: Validate + Serialize + fmt::Debug + Send + Sync;

    /// The collection this record lives in.
    const KIND: ResourceKind;

    /// Whether the record is currently switched on, for records that toggle.
    fn enabled(&self) -> Option<bool> {
        None
    }
}

/// The backend collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Banners,
    Coupons,
    FlashSales,
    Products,
    Orders,
    Sellers,
}

impl ResourceKind {
    /// All collections, in menu order.
    pub const ALL: [ResourceKind; 6] = [
        Self::Products,
        Self::Orders,
        Self::Banners,
        Self::Coupons,
        Self::FlashSales,
        Self::Sellers,
    ];

    /// Collection path relative to the API base, e.g. `flash-sales`.
    pub fn path(self) -> &'static str {
        match self {
            Self::Banners => "banners",
            Self::Coupons => "coupons",
            Self::FlashSales => "flash-sales",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Sellers => "sellers",
        }
    }

    /// Lower-case singular name used in messages.
    pub fn singular(self) -> &'static str {
        match self {
            Self::Banners => "banner",
            Self::Coupons => "coupon",
            Self::FlashSales => "flash sale",
            Self::Products => "product",
            Self::Orders => "order",
            Self::Sellers => "seller",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        let normalized = normalized.strip_suffix('s').unwrap_or(&normalized);
        match normalized {
            "banner" => Ok(Self::Banners),
            "coupon" => Ok(Self::Coupons),
            "flash-sale" | "flashsale" => Ok(Self::FlashSales),
            "product" => Ok(Self::Products),
            "order" => Ok(Self::Orders),
            "seller" => Ok(Self::Sellers),
            _ => Err(Error::usage(format!(
                "unknown resource '{s}', expected one of: {}",
                Self::ALL.map(Self::path).join(", ")
            ))),
        }
    }
}

/// Accepts empty values and absolute http(s) URLs.
pub(crate) fn is_http_url(value: &CellValue) -> bool {
    match value {
        CellValue::Empty => true,
        CellValue::Text(s) => {
            url::Url::parse(s).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
        }
        _ => false,
    }
}

/// Rule for an end timestamp that must come after `start` when both are set.
pub(crate) fn ends_after(
    start: Option<DateTime<Utc>>,
) -> impl Fn(&CellValue) -> bool + Send + Sync + 'static {
    move |end| match (start, end) {
        (Some(start), CellValue::DateTime(end)) => *end > start,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_parsing() {
        assert_eq!("banners".parse::<ResourceKind>().unwrap(), ResourceKind::Banners);
        assert_eq!("Banner".parse::<ResourceKind>().unwrap(), ResourceKind::Banners);
        assert_eq!("flash_sales".parse::<ResourceKind>().unwrap(), ResourceKind::FlashSales);
        assert_eq!("flash-sale".parse::<ResourceKind>().unwrap(), ResourceKind::FlashSales);
        assert!("customers".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_paths() {
        assert_eq!(ResourceKind::FlashSales.path(), "flash-sales");
        assert_eq!(ResourceKind::FlashSales.singular(), "flash sale");
        assert_eq!(ResourceKind::Orders.to_string(), "orders");
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url(&CellValue::Empty));
        assert!(is_http_url(&"https://cdn.example.com/a.png".into()));
        assert!(!is_http_url(&"ftp://example.com/a.png".into()));
        assert!(!is_http_url(&"banner.png".into()));
    }
}
