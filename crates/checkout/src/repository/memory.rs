use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use shared::errors::RepositoryError;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    abstract_trait::{
        book::BookQueryRepositoryTrait,
        cart::CartRepositoryTrait,
        order::repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
        order_item::OrderItemQueryRepositoryTrait,
    },
    domain::requests::order::CreateOrderRecord,
    model::{
        book::Book as BookModel, cart::CartItem as CartItemModel, order::Order as OrderModel,
        order_item::OrderItem as OrderItemModel, status::OrderStatus,
    },
};

/// Checkout storage backed by plain maps, implementing every repository seam.
///
/// The reservation pass runs under a single lock on the book table, which
/// gives it the same effect the row locks give the Postgres repositories:
/// concurrent orders for the same book are applied one at a time and a failed
/// order puts back everything it already took.
#[derive(Default)]
pub struct InMemoryCheckoutStore {
    books: Mutex<HashMap<Uuid, BookModel>>,
    // Cart rows keyed by owner; the cart id mirrors the user id here.
    cart_items: Mutex<HashMap<Uuid, Vec<CartItemModel>>>,
    orders: Mutex<HashMap<Uuid, OrderModel>>,
    order_items: Mutex<HashMap<Uuid, Vec<OrderItemModel>>>,
}

impl InMemoryCheckoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_book(&self, title: &str, price: i64, stock: i32) -> Uuid {
        let now = Utc::now();
        let book = BookModel {
            book_id: Uuid::new_v4(),
            title: title.to_string(),
            price,
            stock,
            created_at: now,
            updated_at: now,
        };
        let book_id = book.book_id;
        self.books.lock().await.insert(book_id, book);
        book_id
    }

    pub async fn set_book_price(&self, book_id: Uuid, price: i64) {
        if let Some(book) = self.books.lock().await.get_mut(&book_id) {
            book.price = price;
            book.updated_at = Utc::now();
        }
    }

    pub async fn stock_of(&self, book_id: Uuid) -> Option<i32> {
        self.books.lock().await.get(&book_id).map(|b| b.stock)
    }

    pub async fn insert_cart_item(&self, user_id: Uuid, book_id: Uuid, quantity: i32) {
        let mut carts = self.cart_items.lock().await;
        carts.entry(user_id).or_default().push(CartItemModel {
            cart_item_id: Uuid::new_v4(),
            cart_id: user_id,
            book_id,
            quantity,
            added_at: Utc::now(),
        });
    }
}

fn release(books: &mut HashMap<Uuid, BookModel>, reserved: &[(Uuid, i32)]) {
    for (book_id, quantity) in reserved {
        if let Some(book) = books.get_mut(book_id) {
            book.stock += quantity;
        }
    }
}

#[async_trait]
impl BookQueryRepositoryTrait for InMemoryCheckoutStore {
    async fn find_by_id(&self, book_id: Uuid) -> Result<Option<BookModel>, RepositoryError> {
        Ok(self.books.lock().await.get(&book_id).cloned())
    }
}

#[async_trait]
impl CartRepositoryTrait for InMemoryCheckoutStore {
    async fn find_items_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CartItemModel>, RepositoryError> {
        Ok(self
            .cart_items
            .lock()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryCheckoutStore {
    async fn create_order_with_items(
        &self,
        record: &CreateOrderRecord,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError> {
        let mut books = self.books.lock().await;

        let mut reserved: Vec<(Uuid, i32)> = Vec::new();
        for line in &record.lines {
            let available = match books.get(&line.book_id) {
                Some(book) => book.stock,
                None => {
                    release(&mut books, &reserved);
                    return Err(RepositoryError::NotFound);
                }
            };
            if line.quantity > available {
                release(&mut books, &reserved);
                return Err(RepositoryError::InsufficientStock {
                    book_id: line.book_id,
                    requested: line.quantity,
                    available,
                });
            }
            if let Some(book) = books.get_mut(&line.book_id) {
                book.stock -= line.quantity;
                book.updated_at = Utc::now();
            }
            reserved.push((line.book_id, line.quantity));
        }
        drop(books);

        let now = Utc::now();
        let order = OrderModel {
            order_id: Uuid::new_v4(),
            user_id: record.user_id,
            total_amount: record.total_amount,
            status: OrderStatus::Confirmed,
            payment_method: record.payment_method.clone(),
            shipping_method: record.shipping_method.clone(),
            customer_name: record.customer_name.clone(),
            customer_email: record.customer_email.clone(),
            customer_phone: record.customer_phone.clone(),
            shipping_address: record.shipping_address.clone(),
            notes: record.notes.clone(),
            created_at: now,
            updated_at: now,
            shipped_at: None,
            delivered_at: None,
        };
        let items: Vec<OrderItemModel> = record
            .lines
            .iter()
            .map(|line| OrderItemModel {
                order_item_id: Uuid::new_v4(),
                order_id: order.order_id,
                book_id: line.book_id,
                quantity: line.quantity,
                price: line.price,
                created_at: now,
            })
            .collect();

        self.orders.lock().await.insert(order.order_id, order.clone());
        self.order_items
            .lock()
            .await
            .insert(order.order_id, items.clone());
        self.cart_items.lock().await.remove(&record.user_id);

        Ok((order, items))
    }

    async fn update_status(
        &self,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<OrderModel>, RepositoryError> {
        let mut orders = self.orders.lock().await;
        let Some(order) = orders.get_mut(&order_id) else {
            return Ok(None);
        };
        if order.status != from {
            return Ok(None);
        }

        let now = Utc::now();
        order.status = to;
        order.updated_at = now;
        if to == OrderStatus::Shipping && order.shipped_at.is_none() {
            order.shipped_at = Some(now);
        }
        if to == OrderStatus::Delivered && order.delivered_at.is_none() {
            order.delivered_at = Some(now);
        }
        Ok(Some(order.clone()))
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryCheckoutStore {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderModel>, RepositoryError> {
        Ok(self.orders.lock().await.get(&order_id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<OrderModel>, RepositoryError> {
        let orders = self.orders.lock().await;
        let mut mine: Vec<OrderModel> = orders
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }
}

#[async_trait]
impl OrderItemQueryRepositoryTrait for InMemoryCheckoutStore {
    async fn find_by_order(&self, order_id: Uuid) -> Result<Vec<OrderItemModel>, RepositoryError> {
        Ok(self
            .order_items
            .lock()
            .await
            .get(&order_id)
            .cloned()
            .unwrap_or_default())
    }
}
