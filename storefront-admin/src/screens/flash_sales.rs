use chrono::Utc;
use gridview::{Alignment, ColumnSpec, Filter};

use super::{Listing, date_cell, money_cell};
use crate::model::FlashSale;

impl Listing for FlashSale {
    fn columns() -> Vec<ColumnSpec<Self>> {
        vec![
            ColumnSpec::new("name", "Name", 20, |f: &FlashSale| f.name.clone().into()).sortable(),
            ColumnSpec::new("product", "Product", 20, |f: &FlashSale| {
                f.product_name.clone().into()
            })
            .sortable(),
            ColumnSpec::new("price", "Price", 9, |f: &FlashSale| f.sale_price.into())
                .align(Alignment::Right)
                .sortable()
                .searchable(false)
                .render(money_cell),
            ColumnSpec::new("discount", "Off", 5, |f: &FlashSale| f.discount_percent().into())
                .align(Alignment::Right)
                .sortable()
                .searchable(false)
                .render(|value, _: &FlashSale| {
                    if value.is_empty() {
                        String::new()
                    } else {
                        format!("{value}%")
                    }
                }),
            ColumnSpec::new("sold", "Sold", 5, |f: &FlashSale| f.sold_percent())
                .align(Alignment::Right)
                .sortable()
                .searchable(false)
                .render(|value, _: &FlashSale| {
                    if value.is_empty() {
                        String::new()
                    } else {
                        format!("{value}%")
                    }
                }),
            ColumnSpec::new("status", "Status", 10, |f: &FlashSale| {
                f.status(Utc::now()).label().into()
            })
            .sortable(),
            ColumnSpec::new("starts", "Starts", 10, |f: &FlashSale| f.start_time.into())
                .sortable()
                .searchable(false)
                .render(date_cell),
        ]
    }

    fn presets() -> &'static [&'static str] {
        &["status", "price", "date"]
    }

    fn preset(name: &str, value: &str) -> Option<Filter> {
        match name {
            "status" => Some(Filter::parse("status", value)),
            "price" => Some(Filter::parse("price", value)),
            "date" => Some(Filter::parse("starts", value)),
            _ => None,
        }
    }
}
