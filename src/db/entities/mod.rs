pub mod prelude {
    pub use super::member::Entity as Member;
    pub use super::task::Entity as Task;
}

pub mod member;
pub mod task;

pub use member::MemberRole;
pub use task::TaskStatus;
