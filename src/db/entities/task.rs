use chrono::NaiveDate;
use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::dao::base_traits::{HasIdColumn, TimestampedActiveModel};

pub const DESCRIPTION_MAX_CHARS: usize = 2000;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    #[sea_orm(string_value = "TODO")]
    Todo,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "IN_REVIEW")]
    InReview,
    #[sea_orm(string_value = "DONE")]
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::InReview => "IN_REVIEW",
            TaskStatus::Done => "DONE",
        }
    }

    /// Display/query label only. Nothing prevents moving a DONE task back.
    pub fn is_terminal(self) -> bool {
        self == TaskStatus::Done
    }

    pub fn or_default(status: Option<Self>) -> Self {
        status.unwrap_or_default()
    }
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "String(StringLen::N(2000))", nullable)]
    pub description: Option<String>,
    #[sea_orm(indexed)]
    pub status: TaskStatus,
    #[sea_orm(indexed)]
    pub assignee: String,
    pub due_date: Option<Date>,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Overdue means a due date strictly before `today` on a task that is
    /// not DONE. Never stored.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        is_overdue(self.due_date, self.status, today)
    }
}

pub fn is_overdue(due_date: Option<NaiveDate>, status: TaskStatus, today: NaiveDate) -> bool {
    match due_date {
        Some(due) => due < today && status != TaskStatus::Done,
        None => false,
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TimestampedActiveModel for ActiveModel {
    fn set_created_at(&mut self, ts: DateTimeWithTimeZone) {
        self.created_at = Set(ts);
    }

    fn set_updated_at(&mut self, ts: DateTimeWithTimeZone) {
        self.updated_at = Set(ts);
    }
}

impl HasIdColumn for Entity {
    fn id_column() -> Column {
        Column::Id
    }
}
