//! Per-row actions and action menu ownership.

use std::fmt;
use std::sync::Arc;

use crate::geometry::Rect;

/// The actions a row menu can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    View,
    Edit,
    Delete,
    Toggle,
}

impl ActionKind {
    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::View => "View",
            ActionKind::Edit => "Edit",
            ActionKind::Delete => "Delete",
            ActionKind::Toggle => "Toggle status",
        }
    }

    /// Returns `true` for actions that must be confirmed before running.
    pub fn is_destructive(self) -> bool {
        matches!(self, ActionKind::Delete)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Callback invoked with the row an action was chosen for.
pub type RowCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Optional callbacks for row actions.
///
/// An absent callback hides the matching menu entry.
///
/// # Example
///
/// ```
/// use gridview::{ActionKind, RowActions};
///
/// let actions = RowActions::<String>::new()
///     .on_edit(|row| println!("edit {row}"))
///     .on_delete(|row| println!("delete {row}"));
/// assert_eq!(actions.available(), vec![ActionKind::Edit, ActionKind::Delete]);
/// ```
pub struct RowActions<T> {
    on_view: Option<RowCallback<T>>,
    on_edit: Option<RowCallback<T>>,
    on_delete: Option<RowCallback<T>>,
    on_toggle: Option<RowCallback<T>>,
}

impl<T> Default for RowActions<T> {
    fn default() -> Self {
        Self {
            on_view: None,
            on_edit: None,
            on_delete: None,
            on_toggle: None,
        }
    }
}

impl<T> Clone for RowActions<T> {
    fn clone(&self) -> Self {
        Self {
            on_view: self.on_view.clone(),
            on_edit: self.on_edit.clone(),
            on_delete: self.on_delete.clone(),
            on_toggle: self.on_toggle.clone(),
        }
    }
}

impl<T> RowActions<T> {
    /// No actions.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_view(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_view = Some(Arc::new(f));
        self
    }

    pub fn on_edit(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_edit = Some(Arc::new(f));
        self
    }

    pub fn on_delete(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_delete = Some(Arc::new(f));
        self
    }

    pub fn on_toggle(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_toggle = Some(Arc::new(f));
        self
    }

    fn callback(&self, kind: ActionKind) -> Option<&RowCallback<T>> {
        match kind {
            ActionKind::View => self.on_view.as_ref(),
            ActionKind::Edit => self.on_edit.as_ref(),
            ActionKind::Delete => self.on_delete.as_ref(),
            ActionKind::Toggle => self.on_toggle.as_ref(),
        }
    }

    /// Returns `true` if the action has a callback.
    pub fn has(&self, kind: ActionKind) -> bool {
        self.callback(kind).is_some()
    }

    /// Actions with callbacks, in menu order.
    pub fn available(&self) -> Vec<ActionKind> {
        [
            ActionKind::View,
            ActionKind::Edit,
            ActionKind::Delete,
            ActionKind::Toggle,
        ]
        .into_iter()
        .filter(|kind| self.has(*kind))
        .collect()
    }

    /// Run the callback for an action. Returns `false` if it is absent.
    pub fn invoke(&self, kind: ActionKind, row: &T) -> bool {
        match self.callback(kind) {
            Some(callback) => {
                callback(row);
                true
            }
            None => false,
        }
    }
}

impl<T> fmt::Debug for RowActions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowActions")
            .field("available", &self.available())
            .finish()
    }
}

/// Owner of the single open action menu of a table.
///
/// Only one row's menu can be open; opening another replaces it. The renderer
/// reports where the open menu was drawn so that clicks outside it close it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuState {
    open: Option<String>,
    bounds: Option<Rect>,
}

impl MenuState {
    /// Row id of the open menu.
    pub fn open_row(&self) -> Option<&str> {
        self.open.as_deref()
    }

    /// Open the menu for a row, closing any other. Returns the previously open row.
    pub fn open(&mut self, row_id: impl Into<String>) -> Option<String> {
        self.bounds = None;
        self.open.replace(row_id.into())
    }

    /// Close the menu. Returns the row that had it open.
    pub fn close(&mut self) -> Option<String> {
        self.bounds = None;
        self.open.take()
    }

    /// Record the open menu's on-screen bounds.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.open.is_some() {
            self.bounds = Some(bounds);
        }
    }

    /// Bounds of the open menu, if drawn.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Handle a click. Closes the menu when the point is outside its bounds.
    ///
    /// Returns `true` if the menu was closed. A menu whose bounds are not yet
    /// known is treated as zero-sized, so any click closes it.
    pub fn click_at(&mut self, x: u16, y: u16) -> bool {
        if self.open.is_none() {
            return false;
        }
        let inside = self.bounds.is_some_and(|b| b.contains(x, y));
        if inside {
            return false;
        }
        self.close();
        true
    }
}
