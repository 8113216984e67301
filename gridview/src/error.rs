//! Contract violations raised by the table view.

/// Errors raised when a table is configured inconsistently.
///
/// These are programming errors, not runtime conditions: a caller that passes
/// duplicate column ids or filters on a column that does not exist has a bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// A table needs at least one column.
    #[error("table has no columns")]
    EmptyColumns,

    /// Two columns share an id.
    #[error("duplicate column id '{0}'")]
    DuplicateColumn(String),

    /// A sort or filter names a column the table does not have.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// A sort names a column that is not sortable.
    #[error("column '{0}' is not sortable")]
    NotSortable(String),

    /// Pages must hold at least one row.
    #[error("page size must be positive")]
    ZeroPageSize,
}
