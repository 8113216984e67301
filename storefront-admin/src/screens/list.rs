use std::sync::{Arc, Mutex, PoisonError};

use gridview::{
    ActionKind, ConfirmModal, ConfirmOutcome, ConfirmStatus, Filter, Notifier, Reconcile,
    RowActions, TabularView,
};
use tokio::sync::{mpsc, oneshot};

use super::Listing;
use crate::api::Resource;
use crate::error::{ApiError, Error};
use crate::navigation::{Navigator, Route};
use crate::validation::Validate;

/// A row action that needs async work, queued by the action menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRequest {
    Delete(String),
    Toggle(String),
}

/// An open confirmation for one row.
#[derive(Debug)]
pub struct PendingConfirm {
    id: String,
    action: ActionKind,
    modal: ConfirmModal,
    closed: oneshot::Receiver<ConfirmOutcome>,
}

impl PendingConfirm {
    /// Id of the row being acted on.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// [`ActionKind::Delete`] or [`ActionKind::Toggle`].
    pub fn action(&self) -> ActionKind {
        self.action
    }

    pub fn modal(&self) -> &ConfirmModal {
        &self.modal
    }

    pub fn cancel(&self) -> bool {
        self.modal.cancel()
    }

    pub fn click_outside(&self) -> bool {
        self.modal.click_outside()
    }

    /// How the modal closed, or `None` while it is still open.
    pub fn outcome(&mut self) -> Option<ConfirmOutcome> {
        self.closed.try_recv().ok()
    }
}

/// Controller for one list screen.
///
/// Owns the table state and forwards row actions: view and edit navigate
/// right away, delete and toggle are queued as [`RowRequest`]s because they
/// need the data layer.
pub struct ListScreen<T: Listing> {
    table: TabularView<T>,
    resource: Arc<dyn Resource<T>>,
    notifier: Arc<dyn Notifier>,
    requests: Mutex<mpsc::UnboundedReceiver<RowRequest>>,
}

impl<T: Listing> ListScreen<T> {
    pub fn new(
        resource: Arc<dyn Resource<T>>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, Error> {
        let (tx, rx) = mpsc::unbounded_channel();
        let table = TabularView::new(T::columns(), T::default_page_size())?
            .with_actions(row_actions(navigator, tx));
        Ok(Self {
            table,
            resource,
            notifier,
            requests: Mutex::new(rx),
        })
    }

    /// Overrides the screen's default page size.
    pub fn with_page_size(self, size: usize) -> Result<Self, Error> {
        self.table.set_page_size(size)?;
        Ok(self)
    }

    pub fn table(&self) -> &TabularView<T> {
        &self.table
    }

    /// Refetches the collection. Search, filters and sort are kept; the page
    /// is clamped to the new row count.
    pub async fn refresh(&self) -> Result<usize, ApiError> {
        match self.resource.list().await {
            Ok(rows) => {
                let count = rows.len();
                self.table.set_rows(rows);
                log::debug!("Loaded {} {}", count, T::KIND);
                Ok(count)
            }
            Err(e) => {
                let message = format!("Failed to load {}: {}", T::KIND, e);
                log::error!("{message}");
                self.notifier.error(&message);
                Err(e)
            }
        }
    }

    /// Applies a named preset, or a filter expression on a column id.
    pub fn apply_filter(&self, name: &str, value: &str) -> Result<(), Error> {
        let filter = match T::preset(name, value) {
            Some(filter) => filter,
            None if self.table.column(name).is_some() => Filter::parse(name, value),
            None => {
                let mut known: Vec<String> =
                    T::presets().iter().map(|p| p.to_string()).collect();
                known.extend(self.table.columns().into_iter().map(|c| c.id));
                return Err(Error::usage(format!(
                    "unknown filter '{}' for {}, expected one of: {}",
                    name,
                    T::KIND,
                    known.join(", ")
                )));
            }
        };
        self.table.set_filter(name, filter)?;
        Ok(())
    }

    /// Opens the detail page of a row.
    pub fn view(&self, id: &str) -> bool {
        self.table.invoke(id, ActionKind::View)
    }

    /// Opens the edit form of a row.
    pub fn edit(&self, id: &str) -> bool {
        self.table.invoke(id, ActionKind::Edit)
    }

    /// Chooses an action from a row's menu.
    pub fn invoke(&self, id: &str, action: ActionKind) -> bool {
        self.table.invoke(id, action)
    }

    /// Next queued delete or toggle request.
    pub fn next_request(&self) -> Option<RowRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .try_recv()
            .ok()
    }

    /// Handles a queued request. Deletes and switch-offs open a
    /// confirmation; switching on runs immediately.
    pub async fn process(&self, request: RowRequest) -> Option<PendingConfirm> {
        match request {
            RowRequest::Delete(id) => self.request_delete(&id),
            RowRequest::Toggle(id) => match self.request_toggle(&id) {
                Some(pending) => Some(pending),
                None => {
                    let _ = self.toggle(&id).await;
                    None
                }
            },
        }
    }

    /// Opens a delete confirmation titled with the row's display title.
    ///
    /// Returns `None` for unknown rows. Nothing is deleted until
    /// [`ListScreen::confirm`] runs.
    pub fn request_delete(&self, id: &str) -> Option<PendingConfirm> {
        let Some(row) = self.table.find_row(id) else {
            log::warn!("Delete requested for unknown {} '{}'", T::KIND.singular(), id);
            return None;
        };
        let (modal, closed) =
            ConfirmModal::new(row.title(), T::KIND.singular(), Arc::clone(&self.notifier));
        Some(PendingConfirm {
            id: id.to_string(),
            action: ActionKind::Delete,
            modal,
            closed,
        })
    }

    /// Opens a confirmation for switching an active row off.
    ///
    /// Returns `None` when the row is unknown or not currently active;
    /// switching on needs no confirmation.
    pub fn request_toggle(&self, id: &str) -> Option<PendingConfirm> {
        let row = self.table.find_row(id)?;
        if row.enabled() != Some(true) {
            return None;
        }
        let (verb, done) = T::disable_verb();
        let (modal, closed) = ConfirmModal::with_verb(
            row.title(),
            T::KIND.singular(),
            verb,
            done,
            Arc::clone(&self.notifier),
        );
        Some(PendingConfirm {
            id: id.to_string(),
            action: ActionKind::Toggle,
            modal,
            closed,
        })
    }

    /// Runs the confirmed action through the modal and reconciles the table
    /// on success. On failure the modal stays open for another try.
    pub async fn confirm(&self, pending: &PendingConfirm) -> ConfirmStatus {
        let id = pending.id.as_str();
        let resource = &self.resource;
        match pending.action {
            ActionKind::Delete => {
                let status = pending.modal.confirm(|| resource.delete(id)).await;
                if status == ConfirmStatus::Confirmed {
                    self.table.reconcile(Reconcile::Remove(id.to_string()));
                }
                status
            }
            ActionKind::Toggle => {
                let mut updated = None;
                let slot = &mut updated;
                let status = pending
                    .modal
                    .confirm(move || async move {
                        *slot = Some(resource.toggle(id).await?);
                        Ok::<(), ApiError>(())
                    })
                    .await;
                if let Some(row) = updated {
                    self.table.reconcile(Reconcile::Replace(row));
                }
                status
            }
            ActionKind::View | ActionKind::Edit => ConfirmStatus::Ignored,
        }
    }

    /// Flips a row's active flag without confirmation.
    pub async fn toggle(&self, id: &str) -> Result<T, ApiError> {
        let title = self
            .table
            .find_row(id)
            .map(|row| row.title())
            .unwrap_or_else(|| id.to_string());
        match self.resource.toggle(id).await {
            Ok(row) => {
                let done = match row.enabled() {
                    Some(true) => "Activated",
                    Some(false) => "Deactivated",
                    None => "Updated",
                };
                let message = format!("{} {} \"{}\"", done, T::KIND.singular(), title);
                log::info!("{message}");
                self.notifier.success(&message);
                self.table.reconcile(Reconcile::Replace(row.clone()));
                Ok(row)
            }
            Err(e) => {
                let message = format!(
                    "Failed to update {} \"{}\": {}",
                    T::KIND.singular(),
                    title,
                    e
                );
                log::warn!("{message}");
                self.notifier.error(&message);
                Err(e)
            }
        }
    }

    /// Validates and creates a record, then refetches.
    pub async fn create(&self, draft: &T::Draft) -> Result<T, Error> {
        self.check(draft)?;
        match self.resource.create(draft).await {
            Ok(row) => {
                self.notifier.success(&format!(
                    "Created {} \"{}\"",
                    T::KIND.singular(),
                    row.title()
                ));
                self.refetch().await;
                Ok(row)
            }
            Err(e) => {
                self.notifier
                    .error(&format!("Failed to create {}: {}", T::KIND.singular(), e));
                Err(e.into())
            }
        }
    }

    /// Validates and updates a record, then refetches.
    pub async fn update(&self, id: &str, draft: &T::Draft) -> Result<T, Error> {
        self.check(draft)?;
        match self.resource.update(id, draft).await {
            Ok(row) => {
                self.notifier.success(&format!(
                    "Updated {} \"{}\"",
                    T::KIND.singular(),
                    row.title()
                ));
                self.refetch().await;
                Ok(row)
            }
            Err(e) => {
                self.notifier
                    .error(&format!("Failed to update {}: {}", T::KIND.singular(), e));
                Err(e.into())
            }
        }
    }

    /// Reports the first failing field.
    fn check(&self, draft: &T::Draft) -> Result<(), Error> {
        if let Err(e) = draft.validate().into_result() {
            if let Some(first) = e.first() {
                self.notifier.error(&first.message);
            }
            log::debug!("Rejected {} draft: {}", T::KIND.singular(), e);
            return Err(e.into());
        }
        Ok(())
    }

    async fn refetch(&self) {
        // Failures were already reported by `refresh`.
        let _ = self.refresh().await;
    }
}

fn row_actions<T: Listing>(
    navigator: Arc<dyn Navigator>,
    requests: mpsc::UnboundedSender<RowRequest>,
) -> RowActions<T> {
    let mut actions = RowActions::new();
    for kind in T::actions() {
        actions = match kind {
            ActionKind::View => {
                let navigator = Arc::clone(&navigator);
                actions.on_view(move |row: &T| navigator.navigate(Route::detail(T::KIND, row.id())))
            }
            ActionKind::Edit => {
                let navigator = Arc::clone(&navigator);
                actions.on_edit(move |row: &T| navigator.navigate(Route::edit(T::KIND, row.id())))
            }
            ActionKind::Delete => {
                let requests = requests.clone();
                actions.on_delete(move |row: &T| {
                    let _ = requests.send(RowRequest::Delete(row.id()));
                })
            }
            ActionKind::Toggle => {
                let requests = requests.clone();
                actions.on_toggle(move |row: &T| {
                    let _ = requests.send(RowRequest::Toggle(row.id()));
                })
            }
        };
    }
    actions
}
