//! Client-side tabular views.
//!
//! `gridview` turns an externally supplied collection into a filtered, sorted,
//! paginated grid with a uniform row-action contract:
//!
//! - [`ColumnSpec`] declares how a column extracts, displays and sorts values
//! - [`TabularView`] owns search, structured filters, sort, page and the open
//!   action menu
//! - [`ConfirmModal`] gates destructive actions behind an explicit, busy-aware
//!   confirmation
//! - [`Notifier`] receives action outcomes
//!
//! # Example
//!
//! ```
//! use gridview::{ColumnSpec, Filter, TableRow, TabularView};
//!
//! #[derive(Clone)]
//! struct Coupon {
//!     id: String,
//!     code: String,
//!     active: bool,
//! }
//!
//! impl TableRow for Coupon {
//!     fn id(&self) -> String {
//!         self.id.clone()
//!     }
//! }
//!
//! let view = TabularView::new(
//!     vec![
//!         ColumnSpec::new("code", "Code", 12, |c: &Coupon| c.code.as_str().into()).sortable(),
//!         ColumnSpec::new("active", "Active", 6, |c: &Coupon| c.active.into()),
//!     ],
//!     10,
//! )
//! .unwrap();
//!
//! view.set_rows(vec![
//!     Coupon { id: "1".into(), code: "SPRING10".into(), active: true },
//!     Coupon { id: "2".into(), code: "WINTER5".into(), active: false },
//! ]);
//! view.set_filter("active", Filter::eq("active", true)).unwrap();
//! assert_eq!(view.page().len(), 1);
//! ```

pub mod actions;
pub mod column;
pub mod confirm;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod notify;
pub mod page;
pub mod render;
pub mod search;
pub mod sort;
pub mod value;
pub mod view;

pub use actions::{ActionKind, MenuState, RowActions};
pub use column::{Alignment, ColumnSpec, TableRow};
pub use confirm::{ConfirmModal, ConfirmOutcome, ConfirmStatus};
pub use error::ViewError;
pub use filter::{Filter, FilterSet};
pub use geometry::Rect;
pub use notify::{LogNotifier, NoticeKind, Notifier, Toast, ToastQueue};
pub use page::{Page, PageState};
pub use search::SearchMode;
pub use sort::{SortDirection, SortState};
pub use value::CellValue;
pub use view::{Reconcile, TabularView, ViewId};
