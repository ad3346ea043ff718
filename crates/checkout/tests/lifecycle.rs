mod common;

use common::*;
use checkout::{
    domain::requests::order::{CancelOrderRequest, UpdateOrderStatusRequest},
    model::status::OrderStatus,
};
use shared::errors::{RepositoryError, ServiceError};
use uuid::Uuid;

async fn placed_order(h: &TestHarness, user: Uuid) -> Uuid {
    let book = h.store.insert_book("Lifecycle Fixture", 4_000, 50).await;
    let placed = h
        .order_command
        .place_order(&order_request(user, vec![line(book, 1)]))
        .await
        .unwrap();
    placed.data.id
}

fn to_status(status: OrderStatus) -> UpdateOrderStatusRequest {
    UpdateOrderStatusRequest { status }
}

#[tokio::test]
async fn shipping_stamps_shipped_at() {
    let h = harness();
    let order_id = placed_order(&h, Uuid::new_v4()).await;

    let shipped = h
        .order_command
        .update_order_status(order_id, &to_status(OrderStatus::Shipping))
        .await
        .unwrap();

    assert_eq!(shipped.data.status, OrderStatus::Shipping);
    assert!(shipped.data.shipped_at.is_some());
    assert!(shipped.data.delivered_at.is_none());
}

#[tokio::test]
async fn repeated_transition_is_rejected_and_stamp_kept() {
    let h = harness();
    let order_id = placed_order(&h, Uuid::new_v4()).await;

    let shipped = h
        .order_command
        .update_order_status(order_id, &to_status(OrderStatus::Shipping))
        .await
        .unwrap();
    let first_stamp = shipped.data.shipped_at.clone();

    let err = h
        .order_command
        .update_order_status(order_id, &to_status(OrderStatus::Shipping))
        .await
        .unwrap_err();
    match err {
        ServiceError::IllegalTransition { from, to } => {
            assert_eq!(from, "shipping");
            assert_eq!(to, "shipping");
        }
        other => panic!("expected IllegalTransition, got {other:?}"),
    }

    let fetched = h.order_query.find_by_id(order_id).await.unwrap();
    assert_eq!(fetched.data.shipped_at, first_stamp);
}

#[tokio::test]
async fn delivery_stamps_delivered_at_and_keeps_shipped_at() {
    let h = harness();
    let order_id = placed_order(&h, Uuid::new_v4()).await;

    let shipped = h
        .order_command
        .update_order_status(order_id, &to_status(OrderStatus::Shipping))
        .await
        .unwrap();

    let delivered = h
        .order_command
        .update_order_status(order_id, &to_status(OrderStatus::Delivered))
        .await
        .unwrap();

    assert_eq!(delivered.data.status, OrderStatus::Delivered);
    assert!(delivered.data.delivered_at.is_some());
    assert_eq!(delivered.data.shipped_at, shipped.data.shipped_at);
}

#[tokio::test]
async fn confirmed_cannot_jump_straight_to_delivered() {
    let h = harness();
    let order_id = placed_order(&h, Uuid::new_v4()).await;

    let err = h
        .order_command
        .update_order_status(order_id, &to_status(OrderStatus::Delivered))
        .await
        .unwrap_err();

    match err {
        ServiceError::IllegalTransition { from, to } => {
            assert_eq!(from, "confirmed");
            assert_eq!(to, "delivered");
        }
        other => panic!("expected IllegalTransition, got {other:?}"),
    }
}

#[tokio::test]
async fn terminal_states_reject_every_transition() {
    let h = harness();

    // Walk one order to delivered.
    let delivered_id = placed_order(&h, Uuid::new_v4()).await;
    h.order_command
        .update_order_status(delivered_id, &to_status(OrderStatus::Shipping))
        .await
        .unwrap();
    h.order_command
        .update_order_status(delivered_id, &to_status(OrderStatus::Delivered))
        .await
        .unwrap();

    for target in [
        OrderStatus::Confirmed,
        OrderStatus::Shipping,
        OrderStatus::Cancelled,
    ] {
        let err = h
            .order_command
            .update_order_status(delivered_id, &to_status(target))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::IllegalTransition { .. }));
    }

    // And one to cancelled.
    let cancelled_id = placed_order(&h, Uuid::new_v4()).await;
    h.order_command
        .update_order_status(cancelled_id, &to_status(OrderStatus::Cancelled))
        .await
        .unwrap();

    for target in [OrderStatus::Shipping, OrderStatus::Delivered] {
        let err = h
            .order_command
            .update_order_status(cancelled_id, &to_status(target))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::IllegalTransition { .. }));
    }
}

#[tokio::test]
async fn buyer_cancels_a_confirmed_order() {
    let h = harness();
    let user = Uuid::new_v4();
    let order_id = placed_order(&h, user).await;

    let cancelled = h
        .order_command
        .cancel_order(order_id, &CancelOrderRequest { user_id: user })
        .await
        .unwrap();

    assert_eq!(cancelled.data.status, OrderStatus::Cancelled);

    // Cancelled is terminal.
    let err = h
        .order_command
        .update_order_status(order_id, &to_status(OrderStatus::Shipping))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::IllegalTransition { .. }));
}

#[tokio::test]
async fn buyer_cannot_cancel_once_shipping() {
    let h = harness();
    let user = Uuid::new_v4();
    let order_id = placed_order(&h, user).await;

    h.order_command
        .update_order_status(order_id, &to_status(OrderStatus::Shipping))
        .await
        .unwrap();

    let err = h
        .order_command
        .cancel_order(order_id, &CancelOrderRequest { user_id: user })
        .await
        .unwrap_err();

    match err {
        ServiceError::IllegalTransition { from, to } => {
            assert_eq!(from, "shipping");
            assert_eq!(to, "cancelled");
        }
        other => panic!("expected IllegalTransition, got {other:?}"),
    }

    let fetched = h.order_query.find_by_id(order_id).await.unwrap();
    assert_eq!(fetched.data.status, OrderStatus::Shipping);
}

#[tokio::test]
async fn foreign_buyer_gets_not_found_on_cancel() {
    let h = harness();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let order_id = placed_order(&h, owner).await;

    let err = h
        .order_command
        .cancel_order(order_id, &CancelOrderRequest { user_id: stranger })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::NotFound)
    ));

    // The order itself is untouched.
    let fetched = h.order_query.find_by_id(order_id).await.unwrap();
    assert_eq!(fetched.data.status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn operator_cancel_is_allowed_during_shipping() {
    let h = harness();
    let order_id = placed_order(&h, Uuid::new_v4()).await;

    h.order_command
        .update_order_status(order_id, &to_status(OrderStatus::Shipping))
        .await
        .unwrap();

    // The status route enforces only the transition table, not ownership;
    // shipping -> cancelled is a legal move for back-office tooling.
    let cancelled = h
        .order_command
        .update_order_status(order_id, &to_status(OrderStatus::Cancelled))
        .await
        .unwrap();
    assert_eq!(cancelled.data.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn missing_order_is_not_found_for_status_updates() {
    let h = harness();

    let err = h
        .order_command
        .update_order_status(Uuid::new_v4(), &to_status(OrderStatus::Shipping))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::NotFound)
    ));
}
