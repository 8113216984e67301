use chrono::Utc;
use gridview::{Alignment, ColumnSpec, Filter};

use super::{Listing, date_cell, money_cell};
use crate::model::Coupon;

impl Listing for Coupon {
    fn columns() -> Vec<ColumnSpec<Self>> {
        vec![
            ColumnSpec::new("code", "Code", 14, |c: &Coupon| c.code.clone().into()).sortable(),
            ColumnSpec::new("type", "Type", 10, |c: &Coupon| c.discount_type.to_string().into())
                .sortable(),
            ColumnSpec::new("discount", "Discount", 10, |c: &Coupon| c.discount_label())
                .align(Alignment::Right)
                .searchable(false),
            ColumnSpec::new("min_purchase", "Min order", 10, |c: &Coupon| c.min_purchase.into())
                .align(Alignment::Right)
                .sortable()
                .searchable(false)
                .render(money_cell),
            ColumnSpec::new("uses", "Uses", 9, |c: &Coupon| c.used_count.into())
                .align(Alignment::Right)
                .sortable()
                .searchable(false)
                .render(|value, c: &Coupon| match c.max_uses {
                    Some(max) => format!("{}/{}", value, max),
                    None => value.to_string(),
                }),
            ColumnSpec::new("status", "Status", 10, |c: &Coupon| {
                c.status(Utc::now()).label().into()
            })
            .sortable(),
            ColumnSpec::new("ends", "Ends", 10, |c: &Coupon| c.end_date.into())
                .sortable()
                .searchable(false)
                .render(date_cell),
        ]
    }

    fn presets() -> &'static [&'static str] {
        &["status", "type", "date"]
    }

    fn preset(name: &str, value: &str) -> Option<Filter> {
        match name {
            "status" => Some(Filter::parse("status", value)),
            "type" => Some(Filter::parse("type", value)),
            "date" => Some(Filter::parse("ends", value)),
            _ => None,
        }
    }
}
