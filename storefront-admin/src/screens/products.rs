use gridview::{Alignment, ColumnSpec, Filter};

use super::{Listing, money_cell};
use crate::model::Product;

impl Listing for Product {
    fn columns() -> Vec<ColumnSpec<Self>> {
        vec![
            ColumnSpec::new("name", "Name", 24, |p: &Product| p.name.clone().into()).sortable(),
            ColumnSpec::new("sku", "SKU", 10, |p: &Product| p.sku.clone().into()),
            ColumnSpec::new("category", "Category", 12, |p: &Product| p.category.clone().into())
                .sortable(),
            ColumnSpec::new("price", "Price", 9, |p: &Product| p.price.into())
                .align(Alignment::Right)
                .sortable()
                .searchable(false)
                .render(money_cell),
            ColumnSpec::new("stock", "Stock", 6, |p: &Product| p.stock.into())
                .align(Alignment::Right)
                .sortable()
                .searchable(false),
            ColumnSpec::new("availability", "Availability", 12, |p: &Product| {
                p.stock_status().label().into()
            })
            .sortable(),
            ColumnSpec::new("seller", "Seller", 16, |p: &Product| p.seller_name.clone().into())
                .sortable(),
        ]
    }

    fn default_page_size() -> usize {
        5
    }

    fn presets() -> &'static [&'static str] {
        &["category", "price", "availability", "seller"]
    }

    fn preset(name: &str, value: &str) -> Option<Filter> {
        match name {
            "category" | "price" | "availability" | "seller" => Some(Filter::parse(name, value)),
            _ => None,
        }
    }
}
