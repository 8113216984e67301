//! Single-column sort state.

use serde::{Deserialize, Serialize};

use crate::column::ColumnSpec;
use crate::value::CellValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9, oldest first).
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl SortDirection {
    /// Header indicator for this direction.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Current sort of a table: at most one column.
///
/// Both fields are set together or both are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    column: Option<String>,
    direction: Option<SortDirection>,
}

impl SortState {
    /// No sort; rows keep insertion order.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sort by a column in a direction.
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction: Some(direction),
        }
    }

    /// The sorted column id, if any.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// The sort direction, if any.
    pub fn direction(&self) -> Option<SortDirection> {
        self.direction
    }

    /// Returns `true` if a column is sorted.
    pub fn is_active(&self) -> bool {
        self.column.is_some()
    }

    /// Direction applied to a given column, if it is the sorted one.
    pub fn direction_for(&self, column: &str) -> Option<SortDirection> {
        match &self.column {
            Some(c) if c == column => self.direction,
            _ => None,
        }
    }

    /// State after a header click on `column`.
    ///
    /// Cycles unsorted → ascending → descending → unsorted. Clicking a
    /// different column starts that column at ascending.
    pub fn cycled(&self, column: &str) -> SortState {
        match self.direction_for(column) {
            None => SortState::new(column, SortDirection::Asc),
            Some(SortDirection::Asc) => SortState::new(column, SortDirection::Desc),
            Some(SortDirection::Desc) => SortState::unsorted(),
        }
    }
}

/// Stable-sort row indices by a column's accessor value.
///
/// Descending uses the exact reverse comparator, so rows with equal keys
/// keep their relative order in both directions.
pub(crate) fn sort_indices<T>(
    indices: &mut [usize],
    rows: &[T],
    column: &ColumnSpec<T>,
    direction: SortDirection,
) {
    let keys: Vec<CellValue> = rows.iter().map(|row| column.value(row)).collect();
    indices.sort_by(|&a, &b| {
        let ordering = keys[a].natural_cmp(&keys[b]);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_tri_state() {
        let state = SortState::unsorted();
        let state = state.cycled("title");
        assert_eq!(state.direction_for("title"), Some(SortDirection::Asc));
        let state = state.cycled("title");
        assert_eq!(state.direction_for("title"), Some(SortDirection::Desc));
        let state = state.cycled("title");
        assert!(!state.is_active());
    }

    #[test]
    fn test_cycle_switches_column() {
        let state = SortState::new("title", SortDirection::Desc).cycled("price");
        assert_eq!(state.column(), Some("price"));
        assert_eq!(state.direction(), Some(SortDirection::Asc));
        assert_eq!(state.direction_for("title"), None);
    }

    #[test]
    fn test_sort_indices_stable() {
        let rows: Vec<(i32, String)> = [(1, "b"), (2, "a"), (3, "b"), (4, "a")]
            .into_iter()
            .map(|(n, s)| (n, s.to_string()))
            .collect();
        let column = ColumnSpec::new("name", "Name", 4, |r: &(i32, String)| r.1.as_str().into());
        let mut indices: Vec<usize> = (0..rows.len()).collect();
        sort_indices(&mut indices, &rows, &column, SortDirection::Asc);
        assert_eq!(indices, vec![1, 3, 0, 2]);
        let mut indices: Vec<usize> = (0..rows.len()).collect();
        sort_indices(&mut indices, &rows, &column, SortDirection::Desc);
        assert_eq!(indices, vec![0, 2, 1, 3]);
    }
}
