use chrono::Utc;
use gridview::{Alignment, ColumnSpec, Filter};

use super::{Listing, date_cell};
use crate::model::Banner;

impl Listing for Banner {
    fn columns() -> Vec<ColumnSpec<Self>> {
        vec![
            ColumnSpec::new("title", "Title", 24, |b: &Banner| b.title.clone().into()).sortable(),
            ColumnSpec::new("position", "Pos", 4, |b: &Banner| b.position.into())
                .align(Alignment::Right)
                .sortable()
                .searchable(false),
            ColumnSpec::new("status", "Status", 10, |b: &Banner| {
                b.status(Utc::now()).label().into()
            })
            .sortable(),
            ColumnSpec::new("starts", "Starts", 10, |b: &Banner| b.start_date.into())
                .sortable()
                .searchable(false)
                .render(date_cell),
            ColumnSpec::new("ends", "Ends", 10, |b: &Banner| b.end_date.into())
                .sortable()
                .searchable(false)
                .render(date_cell),
            ColumnSpec::new("link", "Link", 28, |b: &Banner| b.link_url.clone().into()),
        ]
    }

    fn presets() -> &'static [&'static str] {
        &["status", "date"]
    }

    fn preset(name: &str, value: &str) -> Option<Filter> {
        match name {
            "status" => Some(Filter::parse("status", value)),
            "date" => Some(Filter::parse("starts", value)),
            _ => None,
        }
    }
}
