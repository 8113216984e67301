//! Confirmation modal for destructive row actions.
//!
//! The modal captures input until it is resolved. While the confirmed action
//! is in flight both controls are disabled, and a failure keeps the modal open
//! so the user can retry or cancel.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use crate::notify::Notifier;

/// How a confirmation modal was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The action ran and succeeded.
    Confirmed,
    /// The user dismissed the modal.
    Cancelled,
}

/// Result of a single confirm click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmStatus {
    /// The action succeeded and the modal closed.
    Confirmed,
    /// The action failed; the modal is still open.
    Failed(String),
    /// The click was ignored because the modal was busy or already closed.
    Ignored,
}

const OPEN: u8 = 0;
const BUSY: u8 = 1;
const CLOSED: u8 = 2;

struct ConfirmInner {
    item_name: String,
    item_type: String,
    verb: String,
    done: String,
    /// `OPEN`, `BUSY` or `CLOSED`; only moved by compare-and-swap.
    state: AtomicU8,
    result_tx: Mutex<Option<oneshot::Sender<ConfirmOutcome>>>,
    notifier: Arc<dyn Notifier>,
}

/// A confirmation modal for one item.
///
/// Cheap to clone; clones share state, so a second click on a clone while the
/// first is pending is ignored.
///
/// # Example
///
/// ```ignore
/// let (modal, closed) = ConfirmModal::new("Summer sale", "banner", notifier);
/// match modal.confirm(|| api.delete(&id)).await {
///     ConfirmStatus::Confirmed => view.reconcile(Reconcile::Remove(id)),
///     ConfirmStatus::Failed(_) => { /* modal still open */ }
///     ConfirmStatus::Ignored => {}
/// }
/// ```
#[derive(Clone)]
pub struct ConfirmModal {
    inner: Arc<ConfirmInner>,
}

impl ConfirmModal {
    /// Open a delete confirmation for an item.
    ///
    /// The receiver resolves once the modal closes.
    pub fn new(
        item_name: impl Into<String>,
        item_type: impl Into<String>,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, oneshot::Receiver<ConfirmOutcome>) {
        Self::with_verb(item_name, item_type, "delete", "deleted", notifier)
    }

    /// Open a confirmation with a custom verb, e.g. `("disable", "disabled")`.
    pub fn with_verb(
        item_name: impl Into<String>,
        item_type: impl Into<String>,
        verb: impl Into<String>,
        done: impl Into<String>,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, oneshot::Receiver<ConfirmOutcome>) {
        let (tx, rx) = oneshot::channel();
        let modal = Self {
            inner: Arc::new(ConfirmInner {
                item_name: item_name.into(),
                item_type: item_type.into(),
                verb: verb.into(),
                done: done.into(),
                state: AtomicU8::new(OPEN),
                result_tx: Mutex::new(Some(tx)),
                notifier,
            }),
        };
        (modal, rx)
    }

    pub fn item_name(&self) -> &str {
        &self.inner.item_name
    }

    pub fn item_type(&self) -> &str {
        &self.inner.item_type
    }

    /// Title line, e.g. `Delete banner`.
    pub fn title(&self) -> String {
        format!("{} {}", capitalize(&self.inner.verb), self.inner.item_type)
    }

    /// Body text naming the item.
    pub fn message(&self) -> String {
        format!(
            "Are you sure you want to {} the {} \"{}\"? This action cannot be undone.",
            self.inner.verb, self.inner.item_type, self.inner.item_name
        )
    }

    /// Returns `true` while the confirmed action is in flight.
    pub fn is_busy(&self) -> bool {
        self.state() == BUSY
    }

    /// Returns `true` once the modal has been resolved.
    pub fn is_closed(&self) -> bool {
        self.state() == CLOSED
    }

    /// Whether the confirm control is enabled.
    pub fn can_confirm(&self) -> bool {
        self.state() == OPEN
    }

    /// Whether the cancel control is enabled.
    pub fn can_cancel(&self) -> bool {
        self.can_confirm()
    }

    /// Run the confirmed action.
    ///
    /// `on_confirm` is called at most once per open modal: clicks while busy
    /// or after closing return [`ConfirmStatus::Ignored`] without calling it.
    /// On failure the modal stays open and the error is reported to the
    /// notifier.
    pub async fn confirm<F, Fut, E>(&self, on_confirm: F) -> ConfirmStatus
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        if !self.transition(OPEN, BUSY) {
            log::debug!(
                "ignoring confirm for {} '{}'",
                self.inner.item_type,
                self.inner.item_name
            );
            return ConfirmStatus::Ignored;
        }

        match on_confirm().await {
            Ok(()) => {
                self.transition(BUSY, CLOSED);
                self.send(ConfirmOutcome::Confirmed);
                log::info!(
                    "{} {} '{}'",
                    self.inner.done,
                    self.inner.item_type,
                    self.inner.item_name
                );
                self.inner.notifier.success(&format!(
                    "{} {} \"{}\"",
                    capitalize(&self.inner.done),
                    self.inner.item_type,
                    self.inner.item_name
                ));
                ConfirmStatus::Confirmed
            }
            Err(e) => {
                self.transition(BUSY, OPEN);
                let message = format!(
                    "Failed to {} {} \"{}\": {}",
                    self.inner.verb, self.inner.item_type, self.inner.item_name, e
                );
                log::warn!("{message}");
                self.inner.notifier.error(&message);
                ConfirmStatus::Failed(e.to_string())
            }
        }
    }

    /// Dismiss the modal. Ignored while busy.
    ///
    /// Returns `true` if the modal closed.
    pub fn cancel(&self) -> bool {
        if !self.transition(OPEN, CLOSED) {
            return false;
        }
        self.send(ConfirmOutcome::Cancelled);
        true
    }

    /// A click on the backdrop outside the modal dismisses it.
    pub fn click_outside(&self) -> bool {
        self.cancel()
    }

    fn state(&self) -> u8 {
        self.inner.state.load(Ordering::SeqCst)
    }

    fn transition(&self, from: u8, to: u8) -> bool {
        self.inner
            .state
            .compare_exchange(from, to, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    fn send(&self, outcome: ConfirmOutcome) {
        if let Some(tx) = self
            .inner
            .result_tx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            let _ = tx.send(outcome);
        }
    }
}

impl std::fmt::Debug for ConfirmModal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmModal")
            .field("item_name", &self.inner.item_name)
            .field("item_type", &self.inner.item_type)
            .field("verb", &self.inner.verb)
            .field("busy", &self.is_busy())
            .field("closed", &self.is_closed())
            .finish()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
