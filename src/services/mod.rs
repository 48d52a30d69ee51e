pub mod context;
pub mod member_service;
pub mod task_service;

pub use context::ServiceContext;
pub use member_service::{MemberResponse, MemberService, NewMember};
pub use task_service::{NewTask, TaskContent, TaskResponse, TaskService};
