mod common;

use common::*;
use shared::errors::ServiceError;
use uuid::Uuid;

#[tokio::test]
async fn place_order_charges_snapshot_prices_and_clears_cart() {
    let h = harness();
    let user = Uuid::new_v4();

    let rust_book = h.store.insert_book("The Rust Book", 10_000, 3).await;
    let tokio_book = h.store.insert_book("Async in Practice", 5_000, 1).await;

    h.store.insert_cart_item(user, rust_book, 2).await;
    h.store.insert_cart_item(user, tokio_book, 1).await;

    let req = order_request(user, vec![line(rust_book, 2), line(tokio_book, 1)]);
    let placed = h.order_command.place_order(&req).await.unwrap();

    assert_eq!(placed.status, "success");
    assert_eq!(placed.data.total_amount, 25_000); // 2 x 10000 + 1 x 5000
    assert_eq!(placed.data.user_id, user);
    assert_eq!(placed.data.items.len(), 2);
    assert_eq!(placed.data.status.to_string(), "confirmed");

    // Stock went down by exactly the ordered quantities.
    assert_eq!(h.store.stock_of(rust_book).await, Some(1));
    assert_eq!(h.store.stock_of(tokio_book).await, Some(0));

    // The buyer's cart is gone.
    let cart = h.cart_query.find_by_user(user).await.unwrap();
    assert!(cart.data.is_empty());

    // And the order is durably readable with the same snapshot.
    let fetched = h.order_query.find_by_id(placed.data.id).await.unwrap();
    assert_eq!(fetched.data.total_amount, 25_000);
    assert_eq!(fetched.data.items.len(), 2);
}

#[tokio::test]
async fn duplicate_lines_for_one_book_stay_separate() {
    let h = harness();
    let user = Uuid::new_v4();
    let book = h.store.insert_book("Twice Ordered", 2_000, 5).await;

    let req = order_request(user, vec![line(book, 2), line(book, 2)]);
    let placed = h.order_command.place_order(&req).await.unwrap();

    assert_eq!(placed.data.items.len(), 2); // not merged into one line
    assert!(placed.data.items.iter().all(|i| i.book_id == book));
    assert_eq!(placed.data.total_amount, 8_000);
    assert_eq!(h.store.stock_of(book).await, Some(1));
}

#[tokio::test]
async fn duplicate_lines_fail_together_when_combined_quantity_oversells() {
    let h = harness();
    let user = Uuid::new_v4();
    let book = h.store.insert_book("Nearly Gone", 2_000, 3).await;

    // Each line alone fits the stock of 3, so the advisory pass lets the
    // request through; the second reservation then finds only 1 left.
    let req = order_request(user, vec![line(book, 2), line(book, 2)]);
    let err = h.order_command.place_order(&req).await.unwrap_err();

    match err {
        ServiceError::InsufficientStock {
            book_id,
            requested,
            available,
        } => {
            assert_eq!(book_id, book);
            assert_eq!(requested, 2);
            assert_eq!(available, 1);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    // The first line's reservation was rolled back with the rest.
    assert_eq!(h.store.stock_of(book).await, Some(3));
    let orders = h.order_query.find_by_user(user).await.unwrap();
    assert!(orders.data.is_empty());
}

#[tokio::test]
async fn unknown_book_is_rejected_before_any_mutation() {
    let h = harness();
    let user = Uuid::new_v4();
    let book = h.store.insert_book("Real Book", 1_000, 4).await;

    let req = order_request(user, vec![line(book, 1), line(Uuid::new_v4(), 1)]);
    let err = h.order_command.place_order(&req).await.unwrap_err();

    match err {
        ServiceError::Validation(messages) => {
            assert!(messages.iter().any(|m| m.contains("Unknown book id")));
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(h.store.stock_of(book).await, Some(4));
}

#[tokio::test]
async fn empty_order_is_rejected() {
    let h = harness();

    let req = order_request(Uuid::new_v4(), vec![]);
    let err = h.order_command.place_order(&req).await.unwrap_err();

    match err {
        ServiceError::Validation(messages) => {
            assert!(
                messages
                    .iter()
                    .any(|m| m.contains("at least one item"))
            );
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn non_positive_quantity_is_rejected() {
    let h = harness();
    let book = h.store.insert_book("Zero Qty", 1_000, 4).await;

    let req = order_request(Uuid::new_v4(), vec![line(book, 0)]);
    let err = h.order_command.place_order(&req).await.unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(h.store.stock_of(book).await, Some(4));
}

#[tokio::test]
async fn insufficient_stock_aborts_the_whole_order() {
    let h = harness();
    let user = Uuid::new_v4();

    let in_stock = h.store.insert_book("Plenty", 10_000, 10).await;
    let sold_out = h.store.insert_book("Sold Out", 5_000, 0).await;

    h.store.insert_cart_item(user, in_stock, 2).await;
    h.store.insert_cart_item(user, sold_out, 1).await;

    let req = order_request(user, vec![line(in_stock, 2), line(sold_out, 1)]);
    let err = h.order_command.place_order(&req).await.unwrap_err();

    assert!(matches!(err, ServiceError::InsufficientStock { .. }));

    // Nothing moved: no order, no decrement, cart untouched.
    assert_eq!(h.store.stock_of(in_stock).await, Some(10));
    assert_eq!(h.store.stock_of(sold_out).await, Some(0));
    let orders = h.order_query.find_by_user(user).await.unwrap();
    assert!(orders.data.is_empty());
    let cart = h.cart_query.find_by_user(user).await.unwrap();
    assert_eq!(cart.data.len(), 2);
}

#[tokio::test]
async fn order_total_is_immune_to_later_price_changes() {
    let h = harness();
    let user = Uuid::new_v4();
    let book = h.store.insert_book("Repriced", 10_000, 5).await;

    let req = order_request(user, vec![line(book, 2)]);
    let placed = h.order_command.place_order(&req).await.unwrap();
    assert_eq!(placed.data.total_amount, 20_000);

    h.store.set_book_price(book, 99_999).await;

    let fetched = h.order_query.find_by_id(placed.data.id).await.unwrap();
    assert_eq!(fetched.data.total_amount, 20_000);
    assert_eq!(fetched.data.items[0].price, 10_000);
    assert_eq!(fetched.data.items[0].line_total, 20_000);
}

#[tokio::test]
async fn concurrent_orders_never_oversell() {
    let h = harness();
    let book = h.store.insert_book("Contended", 1_500, 5).await;

    let svc_a = h.order_command.clone();
    let svc_b = h.order_command.clone();
    let req_a = order_request(Uuid::new_v4(), vec![line(book, 3)]);
    let req_b = order_request(Uuid::new_v4(), vec![line(book, 3)]);

    let (res_a, res_b) = tokio::join!(
        tokio::spawn(async move { svc_a.place_order(&req_a).await }),
        tokio::spawn(async move { svc_b.place_order(&req_b).await }),
    );
    let res_a = res_a.unwrap();
    let res_b = res_b.unwrap();

    assert_eq!(
        [res_a.is_ok(), res_b.is_ok()].iter().filter(|ok| **ok).count(),
        1
    );
    assert_eq!(h.store.stock_of(book).await, Some(2));

    let loser = if res_a.is_err() { res_a } else { res_b };
    assert!(matches!(
        loser.unwrap_err(),
        ServiceError::InsufficientStock { .. }
    ));
}

#[tokio::test]
async fn stock_is_split_exactly_across_many_buyers() {
    let h = harness();
    let book = h.store.insert_book("Flash Sale", 900, 10).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let svc = h.order_command.clone();
        let req = order_request(Uuid::new_v4(), vec![line(book, 2)]);
        handles.push(tokio::spawn(async move { svc.place_order(&req).await }));
    }

    let mut placed = 0;
    let mut refused = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => placed += 1,
            Err(ServiceError::InsufficientStock { .. }) => refused += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(placed, 5); // 10 units / 2 per order
    assert_eq!(refused, 3);
    assert_eq!(h.store.stock_of(book).await, Some(0));
}

#[tokio::test]
async fn checkout_clears_only_this_buyers_cart() {
    let h = harness();
    let buyer = Uuid::new_v4();
    let bystander = Uuid::new_v4();
    let book = h.store.insert_book("Shared Interest", 3_000, 10).await;

    h.store.insert_cart_item(buyer, book, 1).await;
    h.store.insert_cart_item(bystander, book, 4).await;

    let req = order_request(buyer, vec![line(book, 1)]);
    h.order_command.place_order(&req).await.unwrap();

    let buyer_cart = h.cart_query.find_by_user(buyer).await.unwrap();
    assert!(buyer_cart.data.is_empty());

    let bystander_cart = h.cart_query.find_by_user(bystander).await.unwrap();
    assert_eq!(bystander_cart.data.len(), 1);
    assert_eq!(bystander_cart.data[0].quantity, 4);
}

#[tokio::test]
async fn orders_are_listed_newest_first_per_buyer() {
    let h = harness();
    let user = Uuid::new_v4();
    let other = Uuid::new_v4();
    let book = h.store.insert_book("Serial Buyer", 1_000, 20).await;

    let first = h
        .order_command
        .place_order(&order_request(user, vec![line(book, 1)]))
        .await
        .unwrap();
    let second = h
        .order_command
        .place_order(&order_request(user, vec![line(book, 2)]))
        .await
        .unwrap();
    h.order_command
        .place_order(&order_request(other, vec![line(book, 3)]))
        .await
        .unwrap();

    let orders = h.order_query.find_by_user(user).await.unwrap();
    assert_eq!(orders.data.len(), 2);
    let ids: Vec<_> = orders.data.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![second.data.id, first.data.id]);
    assert!(orders.data.iter().all(|o| o.user_id == user));
}
