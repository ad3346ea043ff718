pub mod book;
pub mod cart;
pub mod inventory;
pub mod memory;
pub mod order;
pub mod order_item;
