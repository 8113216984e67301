use gridview::{Alignment, CellValue, ColumnSpec, Filter};

use super::{Listing, date_cell};
use crate::model::Seller;

impl Listing for Seller {
    fn columns() -> Vec<ColumnSpec<Self>> {
        vec![
            ColumnSpec::new("store", "Store", 20, |s: &Seller| s.store_name.clone().into())
                .sortable(),
            ColumnSpec::new("owner", "Owner", 16, |s: &Seller| s.owner_name.clone().into())
                .sortable(),
            ColumnSpec::new("email", "Email", 24, |s: &Seller| s.email.clone().into()),
            ColumnSpec::new("approval", "Approval", 10, |s: &Seller| s.status.label().into())
                .sortable(),
            ColumnSpec::new("active", "Active", 6, |s: &Seller| s.is_active.into())
                .sortable()
                .searchable(false),
            ColumnSpec::new("products", "Products", 8, |s: &Seller| s.product_count.into())
                .align(Alignment::Right)
                .sortable()
                .searchable(false),
            ColumnSpec::new("joined", "Joined", 10, |s: &Seller| s.joined_at.into())
                .sortable()
                .searchable(false)
                .render(date_cell),
        ]
    }

    fn presets() -> &'static [&'static str] {
        &["approval", "active", "date"]
    }

    fn preset(name: &str, value: &str) -> Option<Filter> {
        match name {
            "approval" => Some(Filter::parse("approval", value)),
            "active" => Some(Filter::eq("active", CellValue::parse(value))),
            "date" => Some(Filter::parse("joined", value)),
            _ => None,
        }
    }

    fn disable_verb() -> (&'static str, &'static str) {
        ("suspend", "suspended")
    }
}
