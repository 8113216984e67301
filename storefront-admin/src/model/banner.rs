use chrono::{DateTime, Utc};
use gridview::TableRow;
use serde::{Deserialize, Serialize};

use super::{Record, ResourceKind, ScheduleStatus, ends_after, is_http_url};
use crate::validation::{Validate, ValidationResult, Validator};

/// A homepage banner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Banner {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    /// Slot order on the homepage, lowest first.
    pub position: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Banner {
    pub fn status(&self, now: DateTime<Utc>) -> ScheduleStatus {
        ScheduleStatus::at(self.is_active, self.start_date, self.end_date, now)
    }
}

impl TableRow for Banner {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.id.clone())
    }
}

impl Record for Banner {
    type Draft = BannerDraft;
    const KIND: ResourceKind = ResourceKind::Banners;

    fn enabled(&self) -> Option<bool> {
        self.is_active
    }
}

/// Create/update payload for [`Banner`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerDraft {
    pub title: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<&Banner> for BannerDraft {
    fn from(banner: &Banner) -> Self {
        Self {
            title: banner.title.clone().unwrap_or_default(),
            image_url: banner.image_url.clone().unwrap_or_default(),
            link_url: banner.link_url.clone(),
            position: banner.position,
            start_date: banner.start_date,
            end_date: banner.end_date,
            is_active: banner.is_active.unwrap_or(true),
        }
    }
}

impl Validate for BannerDraft {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .field("title", self.title.as_str())
            .required("Title is required")
            .max_length(120, "Title must be at most 120 characters")
            .field("imageUrl", self.image_url.as_str())
            .required("Image URL is required")
            .custom(is_http_url, "Image URL must be an http(s) URL")
            .field("linkUrl", self.link_url.clone())
            .custom(is_http_url, "Link must be an http(s) URL")
            .field("position", self.position)
            .range(Some(0i64.into()), None, "Position cannot be negative")
            .field("endDate", self.end_date)
            .custom(
                ends_after(self.start_date),
                "End date must be after the start date",
            )
            .validate()
    }
}
