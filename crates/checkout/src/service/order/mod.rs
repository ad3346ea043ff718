pub mod command;
pub mod query;

pub use self::command::{OrderCommandService, OrderCommandServiceDeps};
pub use self::query::OrderQueryService;
