use gridview::{ActionKind, Alignment, ColumnSpec, Filter};

use super::{Listing, date_cell, money_cell};
use crate::model::Order;

impl Listing for Order {
    fn columns() -> Vec<ColumnSpec<Self>> {
        vec![
            ColumnSpec::new("number", "Order", 10, |o: &Order| o.order_number.clone().into())
                .sortable(),
            ColumnSpec::new("customer", "Customer", 20, |o: &Order| {
                o.customer_name.clone().into()
            })
            .sortable(),
            ColumnSpec::new("email", "Email", 24, |o: &Order| o.customer_email.clone().into()),
            ColumnSpec::new("items", "Items", 5, |o: &Order| o.item_count.into())
                .align(Alignment::Right)
                .sortable()
                .searchable(false),
            ColumnSpec::new("total", "Total", 10, |o: &Order| o.total.into())
                .align(Alignment::Right)
                .sortable()
                .searchable(false)
                .render(money_cell),
            ColumnSpec::new("status", "Status", 10, |o: &Order| o.status.label().into())
                .sortable(),
            ColumnSpec::new("placed", "Placed", 10, |o: &Order| o.created_at.into())
                .sortable()
                .searchable(false)
                .render(date_cell),
        ]
    }

    /// Orders are never deleted or switched off from the list.
    fn actions() -> Vec<ActionKind> {
        vec![ActionKind::View, ActionKind::Edit]
    }

    fn presets() -> &'static [&'static str] {
        &["status", "total", "date"]
    }

    fn preset(name: &str, value: &str) -> Option<Filter> {
        match name {
            "status" => Some(Filter::parse("status", value)),
            "total" => Some(Filter::parse("total", value)),
            "date" => Some(Filter::parse("placed", value)),
            _ => None,
        }
    }
}
