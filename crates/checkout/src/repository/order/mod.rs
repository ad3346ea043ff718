pub mod command;
pub mod query;

pub use self::command::OrderCommandRepository;
pub use self::query::OrderQueryRepository;
