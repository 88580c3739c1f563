mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use assert_matches::assert_matches;

use common::{order, MockBackend, RecordingNotifier, ScriptedConfirmer};
use threadline_app::error::FailureKind;
use threadline_app::lifecycle::TransitionOutcome;
use threadline_app::{LifecycleError, OrderHistory};
use threadline_core::error::CoreError;
use threadline_core::order::Order;
use threadline_core::status::OrderStatus;
use threadline_core::transition::CANCEL_ORDER_PROMPT;

async fn loaded(orders: Vec<Order>) -> (Arc<MockBackend>, OrderHistory<MockBackend>) {
    let backend = Arc::new(MockBackend::with_orders(orders));
    let history = OrderHistory::new(backend.clone());
    history.refresh().await.unwrap();
    (backend, history)
}

#[tokio::test]
async fn tabs_filter_cached_orders() {
    let (backend, history) = loaded(vec![
        order(1, "DH-0001", OrderStatus::Pending),
        order(2, "DH-0002", OrderStatus::Shipping),
        order(3, "DH-0003", OrderStatus::Shipping),
    ])
    .await;

    history.select_tab("shipping").await.unwrap();
    history.set_search("0003").await;

    let ids: Vec<_> = history.visible().await.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![3]);
    assert_eq!(backend.order_fetches(), 1, "tab switches never re-fetch");
}

#[tokio::test]
async fn cancel_pending_order_sends_trimmed_reason() {
    let (backend, history) = loaded(vec![order(1, "DH-0001", OrderStatus::Pending)]).await;
    let confirmer = ScriptedConfirmer::accepting();
    let notifier = RecordingNotifier::default();

    let outcome = history
        .cancel_order(1, "  Đổi ý  ", &confirmer, &notifier)
        .await
        .unwrap();

    assert_eq!(outcome, TransitionOutcome::Applied);
    assert_eq!(confirmer.prompts(), vec![CANCEL_ORDER_PROMPT.to_string()]);
    assert_eq!(
        backend.order_mutations(),
        vec![(1, OrderStatus::Cancelled, Some("Đổi ý".to_string()))]
    );
    assert_eq!(backend.order_fetches(), 2);
    assert_eq!(notifier.success_count(), 1);
}

#[tokio::test]
async fn declined_cancel_sends_nothing() {
    let (backend, history) = loaded(vec![order(1, "DH-0001", OrderStatus::Paid)]).await;

    let outcome = history
        .cancel_order(
            1,
            "wrong size",
            &ScriptedConfirmer::declining(),
            &RecordingNotifier::default(),
        )
        .await
        .unwrap();

    assert_eq!(outcome, TransitionOutcome::Declined);
    assert!(backend.order_mutations().is_empty());
    assert!(!history.is_busy(1));
}

#[tokio::test]
async fn blank_reason_is_rejected_before_prompting() {
    let (backend, history) = loaded(vec![order(1, "DH-0001", OrderStatus::Pending)]).await;
    let confirmer = ScriptedConfirmer::accepting();
    let notifier = RecordingNotifier::default();

    let err = history.cancel_order(1, "   ", &confirmer, &notifier).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Validation);
    assert!(confirmer.prompts().is_empty());
    assert!(backend.order_mutations().is_empty());
    assert_eq!(notifier.error_count(), 1);
}

#[tokio::test]
async fn shipping_order_cannot_be_cancelled() {
    let (backend, history) = loaded(vec![order(1, "DH-0001", OrderStatus::Shipping)]).await;

    let err = history
        .cancel_order(1, "too slow", &ScriptedConfirmer::accepting(), &RecordingNotifier::default())
        .await
        .unwrap_err();

    assert_matches!(err, LifecycleError::Core(CoreError::InvalidTransition { .. }));
    assert!(backend.order_mutations().is_empty());
}

#[tokio::test]
async fn confirm_delivered_uses_dedicated_call_and_refetches() {
    let (backend, history) = loaded(vec![order(5, "DH-0005", OrderStatus::Shipping)]).await;
    backend.apply_mutations.store(true, Ordering::SeqCst);
    let notifier = RecordingNotifier::default();

    let outcome = history.confirm_delivered(5, &notifier).await.unwrap();

    assert_eq!(outcome, TransitionOutcome::Applied);
    assert_eq!(*backend.delivered_calls.lock().unwrap(), vec![5]);
    assert_eq!(history.orders().await[0].status, OrderStatus::Delivered);
    assert_eq!(notifier.success_count(), 1);
}

#[tokio::test]
async fn confirm_delivered_on_pending_order_is_invalid() {
    let (backend, history) = loaded(vec![order(5, "DH-0005", OrderStatus::Pending)]).await;
    let notifier = RecordingNotifier::default();

    let err = history.confirm_delivered(5, &notifier).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Validation);
    assert!(backend.delivered_calls.lock().unwrap().is_empty());
    assert_eq!(notifier.error_count(), 1);
}

#[tokio::test]
async fn failed_delivery_confirmation_keeps_cache() {
    let (backend, history) = loaded(vec![order(5, "DH-0005", OrderStatus::Shipping)]).await;
    backend.fail_mutations.store(true, Ordering::SeqCst);
    let notifier = RecordingNotifier::default();

    let err = history.confirm_delivered(5, &notifier).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Backend);
    assert_eq!(history.orders().await[0].status, OrderStatus::Shipping);
    assert_eq!(backend.order_fetches(), 1);
    assert_eq!(notifier.error_count(), 1);
}

#[tokio::test]
async fn cancellation_is_reported_even_if_refetch_fails() {
    let (backend, history) = loaded(vec![order(1, "DH-0001", OrderStatus::Pending)]).await;
    backend.fail_fetches.store(true, Ordering::SeqCst);
    let notifier = RecordingNotifier::default();

    let outcome = history
        .cancel_order(1, "Đổi ý", &ScriptedConfirmer::accepting(), &notifier)
        .await
        .unwrap();

    assert_eq!(outcome, TransitionOutcome::AppliedStale);
    assert_eq!(backend.order_mutations().len(), 1);
    assert_eq!(notifier.success_count(), 1);
    assert_eq!(notifier.error_count(), 0);
    assert_eq!(history.orders().await[0].status, OrderStatus::Pending);
}
