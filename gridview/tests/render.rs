use gridview::render::{render_footer, render_header, render_page};
use gridview::{Alignment, ColumnSpec, SortDirection, SortState, TableRow, TabularView};

#[derive(Debug, Clone)]
struct Product {
    id: u32,
    name: Option<String>,
    stock: Option<i64>,
}

impl TableRow for Product {
    fn id(&self) -> String {
        self.id.to_string()
    }
}

fn columns() -> Vec<ColumnSpec<Product>> {
    vec![
        ColumnSpec::new("name", "Name", 8, |p: &Product| p.name.clone().into()).sortable(),
        ColumnSpec::new("stock", "Stock", 7, |p: &Product| p.stock.into())
            .align(Alignment::Right)
            .sortable()
            .render(|value, _| {
                if value.is_empty() {
                    "-".to_string()
                } else {
                    format!("{value} pcs")
                }
            }),
    ]
}

fn products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: Some("Sneakers".into()),
            stock: Some(4),
        },
        Product {
            id: 2,
            name: Some("Leather backpack".into()),
            stock: None,
        },
    ]
}

#[test]
fn test_header_indicator_placement() {
    let cols = columns();
    let header = render_header(&cols, &SortState::new("name", SortDirection::Asc));
    assert!(header.starts_with("Name ▲"));
    let header = render_header(&cols, &SortState::new("stock", SortDirection::Desc));
    assert!(header.ends_with("▼ Stock"));
}

#[test]
fn test_render_page() {
    let view = TabularView::with_rows(columns(), products(), 5).unwrap();
    let out = render_page(&view);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "Name        Stock");
    assert_eq!(lines[2], "Sneakers    4 pcs");
    assert_eq!(lines[3], "Leather…        -");
    assert_eq!(lines[4], "Page 1 of 1 (2 rows)");
}

#[test]
fn test_render_empty_and_filtered_footer() {
    let view = TabularView::with_rows(columns(), products(), 5).unwrap();
    view.set_search("zzz");
    let out = render_page(&view);
    assert!(out.contains("No rows"));
    assert!(out.ends_with("Page 0 of 0 (0 rows, 2 total)"));
    assert_eq!(render_footer(&view.page()), "Page 0 of 0 (0 rows, 2 total)");
}
