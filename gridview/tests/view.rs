//! Tests for TabularView filtering, sorting, paging and menus.

use std::sync::{Arc, Mutex};

use gridview::{
    ActionKind, Alignment, CellValue, ColumnSpec, Filter, Rect, Reconcile, RowActions, SearchMode,
    SortDirection, SortState, TableRow, TabularView, ViewError,
};

#[derive(Debug, Clone, PartialEq)]
struct Banner {
    id: String,
    title: Option<String>,
    status: Option<String>,
    position: Option<i64>,
}

impl TableRow for Banner {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.id.clone())
    }
}

fn banner(n: usize, status: &str) -> Banner {
    Banner {
        id: format!("b{n}"),
        title: Some(format!("Banner {n:02}")),
        status: Some(status.to_string()),
        position: Some((n % 4) as i64),
    }
}

/// 12 banners, 3 of them expired.
fn banners() -> Vec<Banner> {
    (1..=12)
        .map(|n| banner(n, if n % 4 == 0 { "expired" } else { "active" }))
        .collect()
}

fn columns() -> Vec<ColumnSpec<Banner>> {
    vec![
        ColumnSpec::new("title", "Title", 20, |b: &Banner| b.title.clone().into()).sortable(),
        ColumnSpec::new("status", "Status", 10, |b: &Banner| b.status.clone().into()).sortable(),
        ColumnSpec::new("position", "Pos", 4, |b: &Banner| b.position.into())
            .align(Alignment::Right)
            .sortable()
            .searchable(false),
    ]
}

fn view_with(rows: Vec<Banner>, page_size: usize) -> TabularView<Banner> {
    TabularView::with_rows(columns(), rows, page_size).unwrap()
}

fn ids(rows: &[Banner]) -> Vec<String> {
    rows.iter().map(|b| b.id.clone()).collect()
}

#[test]
fn test_search_shrinks_pages_and_resets_index() {
    let view = view_with(banners(), 10);
    let page = view.page();
    assert_eq!(page.len(), 10);
    assert_eq!(page.page_count(), 2);
    assert_eq!(page.index(), 0);

    assert!(view.next_page());
    assert_eq!(view.page().len(), 2);

    view.set_search("expired");
    let page = view.page();
    assert_eq!(page.page_count(), 1);
    assert_eq!(page.index(), 0);
    assert_eq!(page.len(), 3);
    assert_eq!(page.total_count(), 12);
}

#[test]
fn test_empty_search_passes_everything() {
    let view = view_with(banners(), 5);
    view.set_search("expired");
    view.set_search("");
    assert_eq!(view.filtered_count(), 12);
}

#[test]
fn test_search_is_case_insensitive() {
    let view = view_with(banners(), 10);
    view.set_search("EXPIRED");
    assert_eq!(view.filtered_count(), 3);
}

#[test]
fn test_search_skips_unsearchable_columns() {
    let view = view_with(banners(), 10);
    // Positions are 0..=3 but the column is not searchable; titles contain "0".
    view.set_search("3");
    assert_eq!(ids(&view.filtered_rows()), vec!["b3"]);
}

#[test]
fn test_search_monotonic_under_appended_characters() {
    let view = view_with(banners(), 10);
    let query = "banner 1";
    let mut previous = view.filtered_count();
    for end in 1..=query.len() {
        view.set_search(&query[..end]);
        let count = view.filtered_count();
        assert!(count <= previous, "{:?} grew the result set", &query[..end]);
        previous = count;
    }
    assert_eq!(previous, 3); // Banner 10, 11, 12
}

#[test]
fn test_fuzzy_search_mode() {
    let view = view_with(banners(), 10).with_search_mode(SearchMode::Fuzzy);
    view.set_search("xprd");
    assert_eq!(view.filtered_count(), 3);
    view.set_search_mode(SearchMode::Substring);
    assert_eq!(view.filtered_count(), 0);
}

#[test]
fn test_filters_are_anded_with_search() {
    let view = view_with(banners(), 10);
    view.set_filter("status", Filter::eq("status", "active")).unwrap();
    assert_eq!(view.filtered_count(), 9);
    view.set_filter("position", Filter::between("position", 1i64, 2i64))
        .unwrap();
    assert_eq!(view.filtered_count(), 6);
    view.set_search("banner 0");
    assert_eq!(ids(&view.filtered_rows()), vec!["b1", "b2", "b5", "b6", "b9"]);

    assert!(view.clear_filter("position"));
    assert!(!view.clear_filter("position"));
    view.clear_filters();
    view.set_search("");
    assert_eq!(view.filtered_count(), 12);
}

#[test]
fn test_unset_filters_are_ignored() {
    let view = view_with(banners(), 10);
    view.set_filter("position", Filter::range("position", None, None))
        .unwrap();
    view.set_filter("status", Filter::one_of("status", Vec::<CellValue>::new()))
        .unwrap();
    assert_eq!(view.filtered_count(), 12);
}

#[test]
fn test_filter_change_resets_page() {
    let view = view_with(banners(), 5);
    view.last_page();
    assert_eq!(view.page_state().index, 2);
    view.set_filter("status", Filter::eq("status", "active")).unwrap();
    assert_eq!(view.page_state().index, 0);
}

#[test]
fn test_sort_is_idempotent() {
    let view = view_with(banners(), 12);
    view.sort_by("position", SortDirection::Asc).unwrap();
    let first = ids(&view.visible_rows());
    view.sort_by("position", SortDirection::Asc).unwrap();
    assert_eq!(ids(&view.visible_rows()), first);
    // Stable: ties keep insertion order.
    assert_eq!(&first[..3], &["b4", "b8", "b12"]);
}

#[test]
fn test_three_header_clicks_restore_original_order() {
    let view = view_with(banners(), 12);
    let original = ids(&view.visible_rows());

    let state = view.click_header("title").unwrap();
    assert_eq!(state, SortState::new("title", SortDirection::Asc));
    let state = view.click_header("title").unwrap();
    assert_eq!(state, SortState::new("title", SortDirection::Desc));
    assert_eq!(view.visible_rows()[0].id, "b12");
    let state = view.click_header("title").unwrap();
    assert_eq!(state, SortState::unsorted());

    assert_eq!(ids(&view.visible_rows()), original);
}

#[test]
fn test_header_click_replaces_sort_column() {
    let view = view_with(banners(), 12);
    view.click_header("title").unwrap();
    view.click_header("title").unwrap();
    let state = view.click_header("status").unwrap();
    assert_eq!(state, SortState::new("status", SortDirection::Asc));
    assert_eq!(view.sort().direction_for("title"), None);
}

#[test]
fn test_header_click_on_unsortable_column_is_noop() {
    let mut cols = columns();
    cols.push(ColumnSpec::new("id", "ID", 4, |b: &Banner| b.id.as_str().into()));
    let view = TabularView::with_rows(cols, banners(), 10).unwrap();
    assert_eq!(view.click_header("id").unwrap(), SortState::unsorted());
    assert_eq!(
        view.sort_by("id", SortDirection::Asc),
        Err(ViewError::NotSortable("id".to_string()))
    );
}

#[test]
fn test_pages_partition_filtered_rows() {
    for size in 1..=13 {
        let view = view_with(banners(), size);
        view.set_filter("status", Filter::eq("status", "active")).unwrap();
        let filtered = view.filtered_count();
        let pages = view.page_count();
        let mut total = 0;
        for index in 0..pages {
            view.set_page(index);
            let page = view.page();
            if index + 1 < pages {
                assert_eq!(page.len(), size);
            }
            total += page.len();
        }
        assert_eq!(total, filtered, "page size {size}");
    }
}

#[test]
fn test_page_navigation_clamps() {
    let view = view_with(banners(), 5);
    assert!(!view.prev_page());
    assert_eq!(view.set_page(99), 2);
    assert!(!view.next_page());
    assert!(view.prev_page());
    view.first_page();
    assert_eq!(view.page_state().index, 0);
}

#[test]
fn test_refresh_clamps_page_when_rows_shrink() {
    let view = view_with(banners(), 5);
    view.last_page();
    view.set_rows(banners().into_iter().take(4).collect());
    let page = view.page();
    assert_eq!(page.index(), 0);
    assert_eq!(page.len(), 4);

    view.set_rows(Vec::new());
    let page = view.page();
    assert_eq!(page.index(), 0);
    assert_eq!(page.page_count(), 0);
    assert!(page.is_empty());
}

#[test]
fn test_partial_rows_render_and_sort() {
    let rows = vec![
        banner(1, "active"),
        Banner {
            id: "bare".into(),
            title: None,
            status: None,
            position: None,
        },
        banner(2, "expired"),
    ];
    let view = view_with(rows, 10);
    view.set_search("banner");
    assert_eq!(view.filtered_count(), 2);
    view.set_search("");

    view.sort_by("title", SortDirection::Asc).unwrap();
    assert_eq!(ids(&view.visible_rows()), vec!["b1", "b2", "bare"]);
    view.sort_by("title", SortDirection::Desc).unwrap();
    assert_eq!(ids(&view.visible_rows()), vec!["bare", "b2", "b1"]);

    view.set_filter("position", Filter::at_least("position", 0i64))
        .unwrap();
    assert_eq!(view.filtered_count(), 2);
    view.set_filter("position", Filter::is_empty("position")).unwrap();
    assert_eq!(ids(&view.filtered_rows()), vec!["bare"]);
}

#[test]
fn test_construction_contract() {
    assert_eq!(
        TabularView::<Banner>::new(Vec::new(), 10).unwrap_err(),
        ViewError::EmptyColumns
    );
    let mut cols = columns();
    cols.push(ColumnSpec::new("title", "Again", 4, |b: &Banner| b.id.as_str().into()));
    assert_eq!(
        TabularView::new(cols, 10).unwrap_err(),
        ViewError::DuplicateColumn("title".to_string())
    );
    assert_eq!(
        TabularView::new(columns(), 0).unwrap_err(),
        ViewError::ZeroPageSize
    );

    let view = view_with(banners(), 10);
    assert_eq!(
        view.set_filter("x", Filter::eq("missing", 1i64)),
        Err(ViewError::UnknownColumn("missing".to_string()))
    );
    assert!(view.click_header("missing").is_err());
    assert_eq!(view.set_page_size(0), Err(ViewError::ZeroPageSize));
}

#[test]
fn test_only_one_menu_open() {
    let view = view_with(banners(), 10);
    assert!(view.open_menu("b1"));
    assert!(view.open_menu("b2"));
    assert_eq!(view.active_menu().as_deref(), Some("b2"));
    assert!(!view.toggle_menu("b2"));
    assert_eq!(view.active_menu(), None);
    assert!(!view.open_menu("nope"));
}

#[test]
fn test_click_outside_closes_menu() {
    let view = view_with(banners(), 10);
    view.open_menu("b1");
    view.set_menu_bounds(Rect::new(30, 2, 16, 4));
    assert!(!view.click_at(31, 3));
    assert!(view.active_menu().is_some());
    assert!(view.click_at(2, 2));
    assert_eq!(view.active_menu(), None);
}

#[test]
fn test_invoke_runs_callback_and_closes_menu() {
    let edited = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&edited);
    let view = view_with(banners(), 10).with_actions(
        RowActions::new().on_edit(move |b: &Banner| sink.lock().unwrap().push(b.id.clone())),
    );
    assert_eq!(view.menu_actions(), vec![ActionKind::Edit]);

    view.open_menu("b3");
    assert!(view.invoke("b3", ActionKind::Edit));
    assert_eq!(view.active_menu(), None);
    assert_eq!(*edited.lock().unwrap(), vec!["b3".to_string()]);

    // Absent callback is hidden and does nothing.
    assert!(!view.invoke("b3", ActionKind::Delete));
    assert!(!view.invoke("missing", ActionKind::Edit));
}

#[test]
fn test_reconcile_remove_and_replace() {
    let view = view_with(banners(), 10);
    view.open_menu("b1");
    assert!(view.reconcile(Reconcile::Remove("b1".into())));
    assert_eq!(view.len(), 11);
    assert_eq!(view.active_menu(), None);
    assert!(!view.reconcile(Reconcile::Remove("b1".into())));

    let mut updated = banner(2, "expired");
    updated.title = Some("Renamed".into());
    assert!(view.reconcile(Reconcile::Replace(updated.clone())));
    assert_eq!(view.find_row("b2"), Some(updated));
    view.set_search("expired");
    assert_eq!(view.filtered_count(), 4);
}

#[test]
fn test_dirty_flag() {
    let view = view_with(banners(), 10);
    assert!(view.is_dirty());
    view.clear_dirty();
    view.set_search("x");
    assert!(view.is_dirty());
}
