//! List screens.
//!
//! Each record type declares its table once through [`Listing`]; a
//! [`ListScreen`] wires that schema to a data source, a notifier and a
//! navigator.

mod banners;
mod coupons;
mod flash_sales;
mod list;
mod orders;
mod products;
mod sellers;

use gridview::{ActionKind, CellValue, ColumnSpec, Filter};

pub use list::{ListScreen, PendingConfirm, RowRequest};

use crate::model::Record;

/// Rows per page unless a screen or the configuration says otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Table schema and behavior of one list screen.
pub trait Listing: Record {
    /// Column schema, in display order.
    fn columns() -> Vec<ColumnSpec<Self>>;

    /// Row actions offered in the action menu.
    fn actions() -> Vec<ActionKind> {
        vec![
            ActionKind::View,
            ActionKind::Edit,
            ActionKind::Delete,
            ActionKind::Toggle,
        ]
    }

    fn default_page_size() -> usize {
        DEFAULT_PAGE_SIZE
    }

    /// Names accepted by [`Listing::preset`].
    fn presets() -> &'static [&'static str] {
        &[]
    }

    /// Builds a named filter, e.g. `price` with `10..50`.
    fn preset(_name: &str, _value: &str) -> Option<Filter> {
        None
    }

    /// Verb pair used when confirming a switch-off, e.g. `("suspend", "suspended")`.
    fn disable_verb() -> (&'static str, &'static str) {
        ("deactivate", "deactivated")
    }
}

/// Renders timestamps as dates.
pub(crate) fn date_cell<T>(value: &CellValue, _row: &T) -> String {
    match value {
        CellValue::DateTime(dt) => dt.format("%Y-%m-%d").to_string(),
        other => other.to_string(),
    }
}

/// Renders numbers with two decimals.
pub(crate) fn money_cell<T>(value: &CellValue, _row: &T) -> String {
    match value.as_decimal() {
        Some(amount) => format!("{:.2}", amount.round_dp(2)),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_cell_renderers() {
        let when = Utc.with_ymd_and_hms(2024, 6, 30, 18, 45, 0).unwrap();
        assert_eq!(date_cell(&when.into(), &()), "2024-06-30");
        assert_eq!(date_cell(&CellValue::Empty, &()), "");
        assert_eq!(money_cell(&Decimal::new(5, 0).into(), &()), "5.00");
        assert_eq!(money_cell(&Decimal::new(19999, 3).into(), &()), "20.00");
        assert_eq!(money_cell(&CellValue::Empty, &()), "");
    }
}
