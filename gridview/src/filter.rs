//! Structured filters applied on top of free-text search.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::value::CellValue;

/// A structured predicate over one column's value.
///
/// Filters are keyed by name in a [`FilterSet`] and combined with logical AND.
///
/// # Example
///
/// ```
/// use gridview::{CellValue, Filter};
///
/// let active = Filter::eq("status", "active");
/// let cheap = Filter::at_most("price", 20i64);
/// let categories = Filter::one_of("category", ["shoes", "bags"]);
///
/// assert!(active.matches(&CellValue::from("Active")));
/// assert!(cheap.matches(&CellValue::from(15i64)));
/// assert!(!categories.matches(&CellValue::Empty));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Equality: `column == value` (text compares case-insensitively).
    Eq(String, CellValue),
    /// Inclusive range. A missing bound leaves that side open.
    Range {
        column: String,
        min: Option<CellValue>,
        max: Option<CellValue>,
    },
    /// Set membership: `column in values`.
    OneOf(String, Vec<CellValue>),
    /// Case-insensitive substring on the column's text form.
    Contains(String, String),
    /// Column has no value.
    IsEmpty(String),
    /// Column has a value.
    IsNotEmpty(String),
}

impl Filter {
    /// Creates an equality filter.
    pub fn eq(column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        Filter::Eq(column.into(), value.into())
    }

    /// Creates a range filter with optional inclusive bounds.
    pub fn range(
        column: impl Into<String>,
        min: Option<CellValue>,
        max: Option<CellValue>,
    ) -> Self {
        Filter::Range {
            column: column.into(),
            min: min.filter(|v| !v.is_empty()),
            max: max.filter(|v| !v.is_empty()),
        }
    }

    /// Creates a fully bounded inclusive range filter.
    pub fn between(
        column: impl Into<String>,
        min: impl Into<CellValue>,
        max: impl Into<CellValue>,
    ) -> Self {
        Self::range(column, Some(min.into()), Some(max.into()))
    }

    /// Creates a lower-bounded range filter: `column >= min`.
    pub fn at_least(column: impl Into<String>, min: impl Into<CellValue>) -> Self {
        Self::range(column, Some(min.into()), None)
    }

    /// Creates an upper-bounded range filter: `column <= max`.
    pub fn at_most(column: impl Into<String>, max: impl Into<CellValue>) -> Self {
        Self::range(column, None, Some(max.into()))
    }

    /// Creates a set-membership filter.
    pub fn one_of<V: Into<CellValue>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Filter::OneOf(column.into(), values.into_iter().map(Into::into).collect())
    }

    /// Creates a case-insensitive substring filter.
    pub fn contains(column: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::Contains(column.into(), needle.into())
    }

    /// Creates an is-empty filter.
    pub fn is_empty(column: impl Into<String>) -> Self {
        Filter::IsEmpty(column.into())
    }

    /// Creates an is-not-empty filter.
    pub fn is_not_empty(column: impl Into<String>) -> Self {
        Filter::IsNotEmpty(column.into())
    }

    /// Parses a filter expression typed by a user.
    ///
    /// - `a|b|c` is set membership
    /// - `10..50`, `10..` and `..50` are inclusive ranges
    /// - a bare `YYYY-MM-DD` covers the whole day, as a range bound or alone
    /// - `~text` is a substring match
    /// - `!` alone is is-empty, `*` alone is is-not-empty
    /// - anything else is equality
    pub fn parse(column: impl Into<String>, expr: &str) -> Self {
        let column = column.into();
        let expr = expr.trim();
        match expr {
            "!" => return Filter::IsEmpty(column),
            "*" => return Filter::IsNotEmpty(column),
            _ => {}
        }
        if let Some(needle) = expr.strip_prefix('~') {
            return Filter::Contains(column, needle.to_string());
        }
        if let Some((min, max)) = expr.split_once("..") {
            let min = day_bounds(min).map_or_else(|| CellValue::parse(min), |(start, _)| start);
            let max = day_bounds(max).map_or_else(|| CellValue::parse(max), |(_, end)| end);
            return Filter::range(column, Some(min), Some(max));
        }
        if expr.contains('|') {
            return Filter::OneOf(column, expr.split('|').map(CellValue::parse).collect());
        }
        match day_bounds(expr) {
            Some((start, end)) => Filter::range(column, Some(start), Some(end)),
            None => Filter::Eq(column, CellValue::parse(expr)),
        }
    }

    /// The column this filter reads.
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(column, _)
            | Filter::Range { column, .. }
            | Filter::OneOf(column, _)
            | Filter::Contains(column, _)
            | Filter::IsEmpty(column)
            | Filter::IsNotEmpty(column) => column,
        }
    }

    /// Returns `true` if the filter constrains nothing.
    ///
    /// Unset filters (a range with no bounds, an empty set, an empty needle,
    /// equality against `Empty`) are ignored by the view.
    pub fn is_unset(&self) -> bool {
        match self {
            Filter::Eq(_, value) => value.is_empty(),
            Filter::Range { min, max, .. } => min.is_none() && max.is_none(),
            Filter::OneOf(_, values) => values.iter().all(CellValue::is_empty),
            Filter::Contains(_, needle) => needle.is_empty(),
            Filter::IsEmpty(_) | Filter::IsNotEmpty(_) => false,
        }
    }

    /// Tests a column value against this filter.
    pub fn matches(&self, value: &CellValue) -> bool {
        match self {
            Filter::Eq(_, expected) => value.loosely_equals(expected),
            Filter::Range { min, max, .. } => {
                if value.is_empty() {
                    return false;
                }
                let above_min = min
                    .as_ref()
                    .is_none_or(|min| value.natural_cmp(min).is_ge());
                let below_max = max
                    .as_ref()
                    .is_none_or(|max| value.natural_cmp(max).is_le());
                above_min && below_max
            }
            Filter::OneOf(_, values) => values.iter().any(|v| value.loosely_equals(v)),
            Filter::Contains(_, needle) => {
                !value.is_empty()
                    && value
                        .to_string()
                        .to_lowercase()
                        .contains(&needle.to_lowercase())
            }
            Filter::IsEmpty(_) => value.is_empty(),
            Filter::IsNotEmpty(_) => !value.is_empty(),
        }
    }
}

/// First and last instant (UTC) of a date written as `YYYY-MM-DD`.
fn day_bounds(input: &str) -> Option<(CellValue, CellValue)> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()?;
    let start = date.and_hms_opt(0, 0, 0)?.and_utc();
    let end = date.and_hms_nano_opt(23, 59, 59, 999_999_999)?.and_utc();
    Some((CellValue::DateTime(start), CellValue::DateTime(end)))
}

/// Named set of active structured filters.
///
/// Setting a name replaces whatever predicate was stored under it. All active
/// filters must pass for a row to be shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    filters: BTreeMap<String, Filter>,
}

impl FilterSet {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a filter under a name. Returns the replaced filter, if any.
    pub fn set(&mut self, name: impl Into<String>, filter: Filter) -> Option<Filter> {
        self.filters.insert(name.into(), filter)
    }

    /// Removes a named filter.
    pub fn remove(&mut self, name: &str) -> Option<Filter> {
        self.filters.remove(name)
    }

    /// Removes every filter.
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Gets a named filter.
    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.filters.get(name)
    }

    /// Number of stored filters, including unset ones.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` if no filter is stored.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Iterates over the filters that actually constrain rows.
    pub fn active(&self) -> impl Iterator<Item = (&str, &Filter)> {
        self.filters
            .iter()
            .filter(|(_, f)| !f.is_unset())
            .map(|(name, f)| (name.as_str(), f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_range_open_bounds() {
        let filter = Filter::at_least("price", 10i64);
        assert!(filter.matches(&CellValue::Int(10)));
        assert!(filter.matches(&CellValue::Int(1_000)));
        assert!(!filter.matches(&CellValue::Int(9)));
        // A missing lower bound is open, not zero.
        let filter = Filter::at_most("balance", 0i64);
        assert!(filter.matches(&CellValue::Int(-5)));
    }

    #[test]
    fn test_range_rejects_empty() {
        assert!(!Filter::between("price", 1i64, 5i64).matches(&CellValue::Empty));
    }

    #[test]
    fn test_unset_filters() {
        assert!(Filter::range("price", None, None).is_unset());
        assert!(Filter::range("price", Some(CellValue::Empty), None).is_unset());
        assert!(Filter::contains("title", "").is_unset());
        assert!(!Filter::is_empty("title").is_unset());
    }

    #[test]
    fn test_parse_expressions() {
        assert_eq!(
            Filter::parse("status", "active|scheduled"),
            Filter::one_of("status", ["active", "scheduled"])
        );
        assert_eq!(
            Filter::parse("stock", "..5"),
            Filter::range("stock", None, Some(CellValue::Int(5)))
        );
        assert_eq!(
            Filter::parse("stock", "1.."),
            Filter::range("stock", Some(CellValue::Int(1)), None)
        );
        assert_eq!(
            Filter::parse("title", "~sale"),
            Filter::contains("title", "sale")
        );
        assert_eq!(Filter::parse("title", "!"), Filter::is_empty("title"));
        assert_eq!(Filter::parse("active", "yes"), Filter::eq("active", true));
    }

    #[test]
    fn test_date_expressions_cover_whole_days() {
        let at = |d, h, m| {
            CellValue::DateTime(Utc.with_ymd_and_hms(2024, 6, d, h, m, 0).unwrap())
        };

        let june = Filter::parse("starts", "2024-06-01..2024-06-30");
        assert!(june.matches(&at(1, 0, 0)));
        assert!(june.matches(&at(30, 10, 0)));
        assert!(june.matches(&at(30, 23, 59)));
        assert!(!Filter::parse("starts", "2024-06-02..2024-06-29").matches(&at(30, 0, 0)));
        assert!(!Filter::parse("starts", "2024-06-02..").matches(&at(1, 23, 59)));

        let day = Filter::parse("starts", "2024-06-30");
        assert!(day.matches(&at(30, 10, 0)));
        assert!(day.matches(&at(30, 0, 0)));
        assert!(!day.matches(&at(29, 23, 59)));

        // Full timestamps keep their own precision.
        assert!(!Filter::parse("starts", "..2024-06-30T00:00:00Z").matches(&at(30, 10, 0)));
    }

    #[test]
    fn test_set_replaces_by_name() {
        let mut set = FilterSet::new();
        set.set("status", Filter::eq("status", "active"));
        let old = set.set("status", Filter::eq("status", "expired"));
        assert_eq!(old, Some(Filter::eq("status", "active")));
        assert_eq!(set.len(), 1);
        set.set("price", Filter::range("price", None, None));
        assert_eq!(set.active().count(), 1);
    }
}
