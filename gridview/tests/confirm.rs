//! Tests for the confirmation modal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use gridview::{ConfirmModal, ConfirmOutcome, ConfirmStatus, NoticeKind, ToastQueue};
use tokio::sync::oneshot;

fn open(toasts: &ToastQueue) -> (ConfirmModal, oneshot::Receiver<ConfirmOutcome>) {
    ConfirmModal::new("Summer sale", "banner", Arc::new(toasts.clone()))
}

#[test]
fn test_title_and_message_name_the_item() {
    let toasts = ToastQueue::new();
    let (modal, _closed) = open(&toasts);
    assert_eq!(modal.item_name(), "Summer sale");
    assert_eq!(modal.title(), "Delete banner");
    assert!(modal.message().contains("\"Summer sale\""));
    assert!(modal.can_confirm());
    assert!(modal.can_cancel());
}

#[tokio::test]
async fn test_cancel_closes_without_running_action() {
    let toasts = ToastQueue::new();
    let (modal, closed) = open(&toasts);
    let calls = AtomicUsize::new(0);

    assert!(modal.cancel());
    assert!(modal.is_closed());
    assert_eq!(closed.await.unwrap(), ConfirmOutcome::Cancelled);

    let status = modal
        .confirm(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<(), String>(())
        })
        .await;
    assert_eq!(status, ConfirmStatus::Ignored);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(toasts.is_empty());
}

#[tokio::test]
async fn test_click_outside_dismisses() {
    let toasts = ToastQueue::new();
    let (modal, closed) = open(&toasts);
    assert!(modal.click_outside());
    assert_eq!(closed.await.unwrap(), ConfirmOutcome::Cancelled);
}

#[tokio::test]
async fn test_success_closes_and_notifies() {
    let toasts = ToastQueue::new();
    let (modal, closed) = open(&toasts);

    let status = modal.confirm(|| async { Ok::<(), String>(()) }).await;
    assert_eq!(status, ConfirmStatus::Confirmed);
    assert!(modal.is_closed());
    assert!(!modal.is_busy());
    assert_eq!(closed.await.unwrap(), ConfirmOutcome::Confirmed);

    let toasts = toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, NoticeKind::Success);
    assert_eq!(toasts[0].message, "Deleted banner \"Summer sale\"");
}

#[tokio::test]
async fn test_failure_keeps_modal_open() {
    let toasts = ToastQueue::new();
    let (modal, _closed) = open(&toasts);

    let status = modal
        .confirm(|| async { Err::<(), _>("Network error") })
        .await;
    assert_eq!(status, ConfirmStatus::Failed("Network error".to_string()));
    assert!(!modal.is_closed());
    assert!(!modal.is_busy());
    assert!(modal.can_confirm());

    let toasts = toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, NoticeKind::Error);
    assert!(toasts[0].message.contains("Failed"));
    assert!(toasts[0].message.contains("Network error"));

    // A retry after a failure is allowed.
    let status = modal.confirm(|| async { Ok::<(), String>(()) }).await;
    assert_eq!(status, ConfirmStatus::Confirmed);
}

#[tokio::test]
async fn test_repeated_clicks_run_action_once() {
    let toasts = ToastQueue::new();
    let (modal, _closed) = open(&toasts);
    let calls = Arc::new(AtomicUsize::new(0));

    let click = || {
        let calls = Arc::clone(&calls);
        modal.confirm(move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok::<(), String>(())
        })
    };

    let (first, second, third) = tokio::join!(click(), click(), click());
    assert_eq!(first, ConfirmStatus::Confirmed);
    assert_eq!(second, ConfirmStatus::Ignored);
    assert_eq!(third, ConfirmStatus::Ignored);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert_eq!(click().await, ConfirmStatus::Ignored);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_controls_disabled_while_busy() {
    let toasts = ToastQueue::new();
    let (modal, closed) = open(&toasts);
    let (release, gate) = oneshot::channel::<()>();

    let pending = modal.confirm(|| async move {
        let _ = gate.await;
        Ok::<(), String>(())
    });
    let observer = async {
        tokio::task::yield_now().await;
        assert!(modal.is_busy());
        assert!(!modal.can_confirm());
        assert!(!modal.can_cancel());
        assert!(!modal.cancel());
        let _ = release.send(());
    };

    let (status, ()) = tokio::join!(pending, observer);
    assert_eq!(status, ConfirmStatus::Confirmed);
    assert_eq!(closed.await.unwrap(), ConfirmOutcome::Confirmed);
}

#[tokio::test]
async fn test_custom_verb() {
    let toasts = ToastQueue::new();
    let (modal, _closed) = ConfirmModal::with_verb(
        "Acme Store",
        "seller",
        "suspend",
        "suspended",
        Arc::new(toasts.clone()),
    );
    assert_eq!(modal.title(), "Suspend seller");
    modal.confirm(|| async { Err::<(), _>("HTTP 500") }).await;
    assert_eq!(
        toasts.drain()[0].message,
        "Failed to suspend seller \"Acme Store\": HTTP 500"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_clone_on_other_worker_runs_action_once() {
    for _ in 0..300 {
        let toasts = ToastQueue::new();
        let (modal, closed) = open(&toasts);
        let calls = Arc::new(AtomicUsize::new(0));
        let stop = Arc::new(AtomicBool::new(false));

        let clicker = {
            let modal = modal.clone();
            let calls = Arc::clone(&calls);
            let stop = Arc::clone(&stop);
            tokio::spawn(async move {
                while !stop.load(Ordering::SeqCst) {
                    let calls = Arc::clone(&calls);
                    modal
                        .confirm(move || async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok::<(), String>(())
                        })
                        .await;
                    tokio::task::yield_now().await;
                }
            })
        };

        let main_calls = Arc::clone(&calls);
        modal
            .confirm(move || async move {
                main_calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_micros(200)).await;
                Ok::<(), String>(())
            })
            .await;
        stop.store(true, Ordering::SeqCst);
        clicker.await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(modal.is_closed());
        assert_eq!(closed.await.unwrap(), ConfirmOutcome::Confirmed);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cancel_never_races_a_running_action() {
    for _ in 0..300 {
        let toasts = ToastQueue::new();
        let (modal, closed) = open(&toasts);
        let calls = Arc::new(AtomicUsize::new(0));

        let canceller = {
            let modal = modal.clone();
            tokio::spawn(async move { modal.cancel() })
        };
        let action_calls = Arc::clone(&calls);
        let status = modal
            .confirm(move || async move {
                action_calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_micros(50)).await;
                Ok::<(), String>(())
            })
            .await;
        let cancelled = canceller.await.unwrap();

        let outcome = closed.await.unwrap();
        if cancelled {
            assert_eq!(outcome, ConfirmOutcome::Cancelled);
            assert_eq!(status, ConfirmStatus::Ignored);
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        } else {
            assert_eq!(outcome, ConfirmOutcome::Confirmed);
            assert_eq!(status, ConfirmStatus::Confirmed);
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }
}
