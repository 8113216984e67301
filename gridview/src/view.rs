//! Tabular view state.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::actions::{ActionKind, MenuState, RowActions};
use crate::column::{ColumnSpec, TableRow};
use crate::error::ViewError;
use crate::filter::{Filter, FilterSet};
use crate::geometry::Rect;
use crate::page::{Page, PageState};
use crate::search::{SearchMode, TextMatcher};
use crate::sort::{SortDirection, SortState, sort_indices};

/// Unique identifier for a TabularView instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(usize);

impl ViewId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// A single-row change applied after the data source confirmed a mutation.
#[derive(Debug, Clone)]
pub enum Reconcile<T> {
    /// Drop the row with this id.
    Remove(String),
    /// Replace the row with the same id.
    Replace(T),
}

/// Internal state for the TabularView.
#[derive(Debug)]
struct ViewInner<T: TableRow> {
    /// Column definitions.
    columns: Vec<ColumnSpec<T>>,
    /// Rows as last supplied by the data source.
    rows: Vec<T>,
    /// Free-text search.
    search: String,
    search_mode: SearchMode,
    /// Named structured filters.
    filters: FilterSet,
    sort: SortState,
    page: PageState,
    menu: MenuState,
    /// Indices into `rows` that pass search and filters, in sorted order.
    derived: Vec<usize>,
}

impl<T: TableRow> ViewInner<T> {
    fn column(&self, id: &str) -> Option<&ColumnSpec<T>> {
        self.columns.iter().find(|c| c.id == id)
    }

    fn passes(&self, row: &T, text: &mut Option<TextMatcher>) -> bool {
        if let Some(matcher) = text {
            let found = self
                .columns
                .iter()
                .filter(|c| c.searchable)
                .any(|c| matcher.matches(&c.display(row)));
            if !found {
                return false;
            }
        }
        self.filters.active().all(|(_, filter)| {
            self.column(filter.column())
                .is_some_and(|column| filter.matches(&column.value(row)))
        })
    }

    /// Recompute the derived index list and clamp the page.
    fn derive(&mut self) {
        let mut text = TextMatcher::new(&self.search, self.search_mode);
        let mut derived: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| self.passes(row, &mut text))
            .map(|(i, _)| i)
            .collect();

        if let (Some(column_id), Some(direction)) = (self.sort.column(), self.sort.direction())
            && let Some(column) = self.column(column_id)
        {
            sort_indices(&mut derived, &self.rows, column, direction);
        }

        self.derived = derived;
        if self.page.clamp(self.derived.len()) {
            log::debug!("page clamped to {}", self.page.index);
        }
    }

    /// Re-derive after a change to search, filters or sort.
    fn rederive_from_first_page(&mut self) {
        self.page.index = 0;
        self.derive();
    }

    fn close_menu_if_gone(&mut self) {
        if let Some(open) = self.menu.open_row()
            && !self.rows.iter().any(|r| r.id() == open)
        {
            self.menu.close();
        }
    }
}

/// A filterable, sortable, paginated view over externally supplied rows.
///
/// `TabularView<T>` derives what to show from:
/// - Free-text search across searchable columns
/// - Named structured filters (AND-ed together)
/// - A single sort column, cycled by header clicks
/// - A page cursor that resets on search/filter/sort changes and is clamped
///   when the result set shrinks
/// - One open row action menu at a time
///
/// The view never mutates rows on its own; the data source resupplies them
/// with [`set_rows`](Self::set_rows) or the caller applies one
/// [`Reconcile`] step after a confirmed mutation.
///
/// Handles are cheap to clone and share state.
#[derive(Debug)]
pub struct TabularView<T: TableRow> {
    /// Unique identifier.
    id: ViewId,
    inner: Arc<RwLock<ViewInner<T>>>,
    actions: Arc<RwLock<RowActions<T>>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
}

impl<T: TableRow> Clone for TabularView<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            actions: Arc::clone(&self.actions),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: TableRow> TabularView<T> {
    /// Create an empty view.
    ///
    /// Fails on an empty column list, duplicate column ids or a zero page size.
    pub fn new(columns: Vec<ColumnSpec<T>>, page_size: usize) -> Result<Self, ViewError> {
        if columns.is_empty() {
            return Err(ViewError::EmptyColumns);
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id.as_str()) {
                return Err(ViewError::DuplicateColumn(column.id.clone()));
            }
        }
        if page_size == 0 {
            return Err(ViewError::ZeroPageSize);
        }

        let inner = ViewInner {
            columns,
            rows: Vec::new(),
            search: String::new(),
            search_mode: SearchMode::default(),
            filters: FilterSet::new(),
            sort: SortState::unsorted(),
            page: PageState::new(page_size),
            menu: MenuState::default(),
            derived: Vec::new(),
        };
        Ok(Self {
            id: ViewId::new(),
            inner: Arc::new(RwLock::new(inner)),
            actions: Arc::new(RwLock::new(RowActions::new())),
            dirty: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Create a view with initial rows.
    pub fn with_rows(
        columns: Vec<ColumnSpec<T>>,
        rows: Vec<T>,
        page_size: usize,
    ) -> Result<Self, ViewError> {
        let view = Self::new(columns, page_size)?;
        view.set_rows(rows);
        Ok(view)
    }

    /// Set the row action callbacks.
    pub fn with_actions(self, actions: RowActions<T>) -> Self {
        self.set_actions(actions);
        self
    }

    /// Set the search mode.
    pub fn with_search_mode(self, mode: SearchMode) -> Self {
        self.set_search_mode(mode);
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> ViewId {
        self.id
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Check if the view changed since the last [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag after rendering.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Get the column definitions.
    pub fn columns(&self) -> Vec<ColumnSpec<T>> {
        self.inner
            .read()
            .map(|g| g.columns.clone())
            .unwrap_or_default()
    }

    /// Get a column by id.
    pub fn column(&self, id: &str) -> Option<ColumnSpec<T>> {
        self.inner.read().ok().and_then(|g| g.column(id).cloned())
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Number of supplied rows, before filtering.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    /// Check if no rows were supplied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All supplied rows, in insertion order.
    pub fn rows(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| g.rows.clone())
            .unwrap_or_default()
    }

    /// Find a supplied row by ID.
    pub fn find_row(&self, id: &str) -> Option<T> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.rows.iter().find(|row| row.id() == id).cloned())
    }

    /// Replace all rows (a refresh from the data source).
    ///
    /// Search, filters, sort and page are kept; the page index is clamped if
    /// the result set shrank.
    pub fn set_rows(&self, rows: Vec<T>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows = rows;
            guard.close_menu_if_gone();
            guard.derive();
            self.mark_dirty();
        }
    }

    /// Apply one confirmed change. Returns `false` if the row was not found.
    pub fn reconcile(&self, change: Reconcile<T>) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let applied = match change {
            Reconcile::Remove(id) => {
                let before = guard.rows.len();
                guard.rows.retain(|row| row.id() != id);
                guard.rows.len() != before
            }
            Reconcile::Replace(row) => {
                let id = row.id();
                match guard.rows.iter_mut().find(|r| r.id() == id) {
                    Some(slot) => {
                        *slot = row;
                        true
                    }
                    None => false,
                }
            }
        };
        if applied {
            guard.close_menu_if_gone();
            guard.derive();
            self.mark_dirty();
        }
        applied
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Current search text.
    pub fn search(&self) -> String {
        self.inner
            .read()
            .map(|g| g.search.clone())
            .unwrap_or_default()
    }

    /// Set the search text and return to the first page.
    pub fn set_search(&self, text: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.search = text.into();
            guard.rederive_from_first_page();
            self.mark_dirty();
        }
    }

    /// Current search mode.
    pub fn search_mode(&self) -> SearchMode {
        self.inner
            .read()
            .map(|g| g.search_mode)
            .unwrap_or_default()
    }

    /// Change how search text matches.
    pub fn set_search_mode(&self, mode: SearchMode) {
        if let Ok(mut guard) = self.inner.write()
            && guard.search_mode != mode
        {
            guard.search_mode = mode;
            guard.rederive_from_first_page();
            self.mark_dirty();
        }
    }

    // -------------------------------------------------------------------------
    // Structured filters
    // -------------------------------------------------------------------------

    /// Snapshot of the stored filters.
    pub fn filters(&self) -> FilterSet {
        self.inner
            .read()
            .map(|g| g.filters.clone())
            .unwrap_or_default()
    }

    /// Store a named filter and return to the first page.
    pub fn set_filter(&self, name: impl Into<String>, filter: Filter) -> Result<(), ViewError> {
        let Ok(mut guard) = self.inner.write() else {
            return Ok(());
        };
        if guard.column(filter.column()).is_none() {
            return Err(ViewError::UnknownColumn(filter.column().to_string()));
        }
        guard.filters.set(name, filter);
        guard.rederive_from_first_page();
        self.mark_dirty();
        Ok(())
    }

    /// Remove a named filter. Returns `false` if it was not set.
    pub fn clear_filter(&self, name: &str) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.filters.remove(name).is_some()
        {
            guard.rederive_from_first_page();
            self.mark_dirty();
            return true;
        }
        false
    }

    /// Remove every filter.
    pub fn clear_filters(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.filters.clear();
            guard.rederive_from_first_page();
            self.mark_dirty();
        }
    }

    // -------------------------------------------------------------------------
    // Sort
    // -------------------------------------------------------------------------

    /// Current sort state.
    pub fn sort(&self) -> SortState {
        self.inner
            .read()
            .map(|g| g.sort.clone())
            .unwrap_or_default()
    }

    /// Sort by a column and return to the first page.
    pub fn sort_by(&self, column: &str, direction: SortDirection) -> Result<(), ViewError> {
        self.apply_sort(SortState::new(column, direction))
    }

    /// Restore insertion order.
    pub fn clear_sort(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.sort = SortState::unsorted();
            guard.rederive_from_first_page();
            self.mark_dirty();
        }
    }

    fn apply_sort(&self, sort: SortState) -> Result<(), ViewError> {
        let Ok(mut guard) = self.inner.write() else {
            return Ok(());
        };
        if let Some(column_id) = sort.column() {
            match guard.column(column_id) {
                None => return Err(ViewError::UnknownColumn(column_id.to_string())),
                Some(c) if !c.sortable => return Err(ViewError::NotSortable(column_id.to_string())),
                Some(_) => {}
            }
        }
        log::debug!("{} sort -> {:?}", self.id, sort);
        guard.sort = sort;
        guard.rederive_from_first_page();
        self.mark_dirty();
        Ok(())
    }

    /// Handle a header click: unsorted → ascending → descending → unsorted.
    ///
    /// Clicking a non-sortable column changes nothing. Returns the resulting
    /// sort state.
    pub fn click_header(&self, column: &str) -> Result<SortState, ViewError> {
        let current = {
            let Ok(guard) = self.inner.read() else {
                return Ok(SortState::unsorted());
            };
            match guard.column(column) {
                None => return Err(ViewError::UnknownColumn(column.to_string())),
                Some(c) if !c.sortable => return Ok(guard.sort.clone()),
                Some(_) => guard.sort.clone(),
            }
        };
        let next = current.cycled(column);
        self.apply_sort(next.clone())?;
        Ok(next)
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Current page cursor.
    pub fn page_state(&self) -> PageState {
        self.inner
            .read()
            .map(|g| g.page)
            .unwrap_or(PageState { index: 0, size: 1 })
    }

    /// Rows passing search and filters.
    pub fn filtered_count(&self) -> usize {
        self.inner.read().map(|g| g.derived.len()).unwrap_or(0)
    }

    /// Number of pages for the current search and filters.
    pub fn page_count(&self) -> usize {
        self.inner
            .read()
            .map(|g| g.page.page_count(g.derived.len()))
            .unwrap_or(0)
    }

    /// Jump to a page, clamped to the valid range. Returns the resulting index.
    pub fn set_page(&self, index: usize) -> usize {
        let Ok(mut guard) = self.inner.write() else {
            return 0;
        };
        let count = guard.derived.len();
        let previous = guard.page.index;
        guard.page.index = index;
        guard.page.clamp(count);
        if guard.page.index != previous {
            self.mark_dirty();
        }
        guard.page.index
    }

    /// Move to the next page. Returns `false` on the last page.
    pub fn next_page(&self) -> bool {
        let current = self.page_state().index;
        self.set_page(current + 1) != current
    }

    /// Move to the previous page. Returns `false` on the first page.
    pub fn prev_page(&self) -> bool {
        let current = self.page_state().index;
        current > 0 && self.set_page(current - 1) != current
    }

    /// Move to the first page.
    pub fn first_page(&self) {
        self.set_page(0);
    }

    /// Move to the last page.
    pub fn last_page(&self) {
        self.set_page(usize::MAX);
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&self, size: usize) -> Result<(), ViewError> {
        if size == 0 {
            return Err(ViewError::ZeroPageSize);
        }
        if let Ok(mut guard) = self.inner.write() {
            guard.page = PageState::new(size);
            self.mark_dirty();
        }
        Ok(())
    }

    /// Snapshot of the current page.
    pub fn page(&self) -> Page<T> {
        let Ok(guard) = self.inner.read() else {
            return Page::new(Vec::new(), PageState::new(1), 0, 0);
        };
        let range = guard.page.range(guard.derived.len());
        let rows = guard.derived[range]
            .iter()
            .map(|&i| guard.rows[i].clone())
            .collect();
        Page::new(rows, guard.page, guard.derived.len(), guard.rows.len())
    }

    /// Rows on the current page.
    pub fn visible_rows(&self) -> Vec<T> {
        self.page().into_rows()
    }

    /// All rows passing search and filters, sorted, across every page.
    pub fn filtered_rows(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| g.derived.iter().map(|&i| g.rows[i].clone()).collect())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Action menu
    // -------------------------------------------------------------------------

    /// Replace the row action callbacks.
    pub fn set_actions(&self, actions: RowActions<T>) {
        if let Ok(mut guard) = self.actions.write() {
            *guard = actions;
            self.mark_dirty();
        }
    }

    /// Actions shown in every row menu.
    pub fn menu_actions(&self) -> Vec<ActionKind> {
        self.actions
            .read()
            .map(|a| a.available())
            .unwrap_or_default()
    }

    /// Row id whose menu is open.
    pub fn active_menu(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.menu.open_row().map(str::to_string))
    }

    /// Open a row's menu, closing any other. Returns `false` for unknown rows.
    pub fn open_menu(&self, row_id: &str) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.rows.iter().any(|r| r.id() == row_id)
        {
            guard.menu.open(row_id);
            self.mark_dirty();
            return true;
        }
        false
    }

    /// Open the row's menu, or close it if it is already open.
    ///
    /// Returns `true` if the menu is open afterwards.
    pub fn toggle_menu(&self, row_id: &str) -> bool {
        if self.active_menu().as_deref() == Some(row_id) {
            self.close_menu();
            return false;
        }
        self.open_menu(row_id)
    }

    /// Close the open menu. Returns the row it belonged to.
    pub fn close_menu(&self) -> Option<String> {
        let closed = self.inner.write().ok().and_then(|mut g| g.menu.close());
        if closed.is_some() {
            self.mark_dirty();
        }
        closed
    }

    /// Record where the renderer drew the open menu.
    pub fn set_menu_bounds(&self, bounds: Rect) {
        if let Ok(mut guard) = self.inner.write() {
            guard.menu.set_bounds(bounds);
        }
    }

    /// Handle a click anywhere on screen. Closes the menu if the click is
    /// outside it. Returns `true` if the menu closed.
    pub fn click_at(&self, x: u16, y: u16) -> bool {
        let closed = self
            .inner
            .write()
            .map(|mut g| g.menu.click_at(x, y))
            .unwrap_or(false);
        if closed {
            self.mark_dirty();
        }
        closed
    }

    /// Choose an action for a row: closes the menu and runs the callback.
    ///
    /// Returns `false` if the row or the callback does not exist.
    pub fn invoke(&self, row_id: &str, kind: ActionKind) -> bool {
        let Some(row) = self.find_row(row_id) else {
            return false;
        };
        self.close_menu();
        // Callback runs without any view lock held so it may call back in.
        let actions = match self.actions.read() {
            Ok(guard) => guard.clone(),
            Err(_) => return false,
        };
        let invoked = actions.invoke(kind, &row);
        if invoked {
            log::debug!("{} {} on row {}", self.id, kind, row_id);
        }
        invoked
    }
}
