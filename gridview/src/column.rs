//! TableRow trait and column schema types.

use std::fmt;
use std::sync::Arc;

use crate::value::CellValue;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Extracts a cell value from a row.
pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Formats an extracted value for display.
pub type CellRenderer<T> = Arc<dyn Fn(&CellValue, &T) -> String + Send + Sync>;

/// Declarative description of one table column.
///
/// A column knows how to pull a value out of a row (the accessor) and how to
/// show it (the optional renderer). The view sorts, filters and searches on
/// accessor values; only display goes through the renderer.
///
/// # Examples
///
/// ```
/// use gridview::{Alignment, CellValue, ColumnSpec};
///
/// #[derive(Clone)]
/// struct Coupon {
///     code: Option<String>,
///     uses: Option<i64>,
/// }
///
/// let columns = vec![
///     ColumnSpec::new("code", "Code", 12, |c: &Coupon| c.code.clone().into()).sortable(),
///     ColumnSpec::new("uses", "Uses", 6, |c: &Coupon| c.uses.into())
///         .align(Alignment::Right)
///         .sortable()
///         .searchable(false),
/// ];
/// assert_eq!(columns[0].value(&Coupon { code: None, uses: None }), CellValue::Empty);
/// ```
pub struct ColumnSpec<T> {
    /// Unique column identifier, used by sort state and filters.
    pub id: String,
    /// Column header text
    pub header: String,
    /// Column width in terminal columns (fixed)
    pub width: u16,
    /// Horizontal alignment
    pub align: Alignment,
    /// Whether header clicks sort by this column
    pub sortable: bool,
    /// Whether free-text search looks at this column
    pub searchable: bool,
    accessor: Accessor<T>,
    renderer: Option<CellRenderer<T>>,
}

impl<T> ColumnSpec<T> {
    /// Create a new column.
    ///
    /// Columns are searchable and not sortable by default.
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        width: u16,
        accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            width,
            align: Alignment::Left,
            sortable: false,
            searchable: true,
            accessor: Arc::new(accessor),
            renderer: None,
        }
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Include or exclude the column from free-text search.
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Set a custom display renderer.
    pub fn render(
        mut self,
        renderer: impl Fn(&CellValue, &T) -> String + Send + Sync + 'static,
    ) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Extract this column's value from a row.
    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    /// Display text for this column's cell in a row.
    pub fn display(&self, row: &T) -> String {
        let value = self.value(row);
        self.display_value(&value, row)
    }

    pub(crate) fn display_value(&self, value: &CellValue, row: &T) -> String {
        match &self.renderer {
            Some(render) => render(value, row),
            None => value.to_string(),
        }
    }
}

impl<T> Clone for ColumnSpec<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            width: self.width,
            align: self.align,
            sortable: self.sortable,
            searchable: self.searchable,
            accessor: Arc::clone(&self.accessor),
            renderer: self.renderer.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("custom_render", &self.renderer.is_some())
            .finish()
    }
}

/// Trait for records that can be displayed as rows in a [`TabularView`](crate::TabularView).
///
/// The view never looks inside a row beyond its identity and whatever the
/// column schema extracts.
///
/// ```
/// use gridview::TableRow;
///
/// #[derive(Clone)]
/// struct Banner {
///     id: String,
///     title: Option<String>,
/// }
///
/// impl TableRow for Banner {
///     fn id(&self) -> String {
///         self.id.clone()
///     }
///
///     fn title(&self) -> String {
///         self.title.clone().unwrap_or_else(|| self.id.clone())
///     }
/// }
/// ```
pub trait TableRow: Send + Sync + Clone + 'static {
    /// Stable identifier for this row.
    ///
    /// Used for menu ownership and reconciliation across row refreshes.
    fn id(&self) -> String;

    /// Human-readable title, shown in confirmation prompts.
    fn title(&self) -> String {
        self.id()
    }
}
