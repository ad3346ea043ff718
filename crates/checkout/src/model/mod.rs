pub mod book;
pub mod cart;
pub mod order;
pub mod order_item;
pub mod status;
