pub mod base;
pub mod base_traits;
mod context;
pub mod error;
pub mod member_dao;
pub mod task_dao;

pub use base::DaoBase;
pub use base_traits::{HasIdColumn, TimestampedActiveModel};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use member_dao::MemberDao;
pub use task_dao::TaskDao;
