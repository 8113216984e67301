use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a time-boxed promotion (banner, coupon, flash sale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Scheduled,
    Active,
    Expired,
    Disabled,
}

impl ScheduleStatus {
    /// Status at `now`. A switched-off promotion is disabled regardless of
    /// its dates; missing dates leave the window open on that side.
    pub fn at(
        is_active: Option<bool>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        if is_active == Some(false) {
            Self::Disabled
        } else if end.is_some_and(|end| end < now) {
            Self::Expired
        } else if start.is_some_and(|start| start > now) {
            Self::Scheduled
        } else {
            Self::Active
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Active => "Active",
            Self::Expired => "Expired",
            Self::Disabled => "Disabled",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
