use chrono::NaiveDate;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, Set};

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::Task;
use crate::db::entities::task::{self, TaskStatus};

#[derive(Clone)]
pub struct TaskDao {
    db: DatabaseConnection,
}

impl DaoBase for TaskDao {
    type Entity = Task;
    const ENTITY_NAME: &'static str = "Task";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl TaskDao {
    pub async fn find_by_assignee<C>(
        &self,
        conn: &C,
        assignee: &str,
    ) -> DaoResult<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        let condition = Condition::all().add(task::Column::Assignee.eq(assignee));
        self.find_where(conn, condition).await
    }

    pub async fn find_by_status<C>(
        &self,
        conn: &C,
        status: TaskStatus,
    ) -> DaoResult<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        let condition = Condition::all().add(task::Column::Status.eq(status));
        self.find_where(conn, condition).await
    }

    pub async fn find_by_assignee_and_status<C>(
        &self,
        conn: &C,
        assignee: &str,
        status: TaskStatus,
    ) -> DaoResult<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        let condition = Condition::all()
            .add(task::Column::Assignee.eq(assignee))
            .add(task::Column::Status.eq(status));
        self.find_where(conn, condition).await
    }

    /// Tasks due strictly before `today` that are not DONE. Rows without a
    /// due date never match.
    pub async fn find_overdue<C>(
        &self,
        conn: &C,
        today: NaiveDate,
    ) -> DaoResult<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        let condition = Condition::all()
            .add(task::Column::DueDate.lt(today))
            .add(task::Column::Status.ne(TaskStatus::Done));
        self.find_where(conn, condition).await
    }

    pub async fn create_task<C>(
        &self,
        conn: &C,
        title: &str,
        description: Option<&str>,
        status: TaskStatus,
        assignee: &str,
        due_date: Option<NaiveDate>,
    ) -> DaoResult<task::Model>
    where
        C: ConnectionTrait,
    {
        let model = task::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.map(str::to_string)),
            status: Set(status),
            assignee: Set(assignee.to_string()),
            due_date: Set(due_date),
            ..Default::default()
        };
        self.create(conn, model).await
    }

    pub async fn update_status<C>(
        &self,
        conn: &C,
        id: i64,
        status: TaskStatus,
    ) -> DaoResult<task::Model>
    where
        C: ConnectionTrait,
    {
        self.update(conn, id, move |active| {
            active.status = Set(status);
        })
        .await
    }

    pub async fn update_content<C>(
        &self,
        conn: &C,
        id: i64,
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> DaoResult<task::Model>
    where
        C: ConnectionTrait,
    {
        let title = title.to_string();
        let description = description.map(str::to_string);
        self.update(conn, id, move |active| {
            active.title = Set(title);
            active.description = Set(description);
            active.due_date = Set(due_date);
        })
        .await
    }
}
