use chrono::{Local, NaiveDate};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    db::dao::{DaoBase, DaoLayerError, TaskDao},
    db::entities::task::{self, TaskStatus},
    error::AppError,
};

/// Validated input for [`TaskService::create_task`].
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
}

/// Replacement content for [`TaskService::update_task`].
#[derive(Debug, Clone)]
pub struct TaskContent {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
    pub overdue: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl TaskResponse {
    pub fn from_model(model: task::Model, today: NaiveDate) -> Self {
        let overdue = model.is_overdue_on(today);
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            status: model.status,
            assignee: model.assignee,
            due_date: model.due_date,
            overdue,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Clone)]
pub struct TaskService {
    task_dao: TaskDao,
    today: fn() -> NaiveDate,
}

impl TaskService {
    pub fn new(task_dao: TaskDao) -> Self {
        Self {
            task_dao,
            today: local_today,
        }
    }

    /// Replaces the source of "today" used for overdue checks.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    // read per call so a long-lived service never caches the date
    fn present(&self, tasks: Vec<task::Model>) -> Vec<TaskResponse> {
        let today = (self.today)();
        tasks
            .into_iter()
            .map(|model| TaskResponse::from_model(model, today))
            .collect()
    }

    fn present_one(&self, model: task::Model) -> TaskResponse {
        TaskResponse::from_model(model, (self.today)())
    }

    pub async fn list_tasks(&self) -> Result<Vec<TaskResponse>, AppError> {
        let tasks = self.task_dao.find_all(self.task_dao.db()).await?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(self.present(tasks))
    }

    pub async fn get_task(&self, id: i64) -> Result<TaskResponse, AppError> {
        let task = self.task_dao.require_by_id(self.task_dao.db(), id).await?;
        Ok(self.present_one(task))
    }

    pub async fn list_tasks_by_assignee(
        &self,
        assignee: &str,
    ) -> Result<Vec<TaskResponse>, AppError> {
        let tasks = self
            .task_dao
            .find_by_assignee(self.task_dao.db(), assignee)
            .await?;
        Ok(self.present(tasks))
    }

    pub async fn list_tasks_by_assignee_and_status(
        &self,
        assignee: &str,
        status: TaskStatus,
    ) -> Result<Vec<TaskResponse>, AppError> {
        let tasks = self
            .task_dao
            .find_by_assignee_and_status(self.task_dao.db(), assignee, status)
            .await?;
        Ok(self.present(tasks))
    }

    pub async fn list_tasks_by_status(
        &self,
        status: TaskStatus,
    ) -> Result<Vec<TaskResponse>, AppError> {
        let tasks = self
            .task_dao
            .find_by_status(self.task_dao.db(), status)
            .await?;
        Ok(self.present(tasks))
    }

    /// Tasks whose due date is before today and that are not DONE, with
    /// "today" taken at call time.
    pub async fn list_overdue_tasks(&self) -> Result<Vec<TaskResponse>, AppError> {
        let today = (self.today)();
        let tasks = self
            .task_dao
            .find_overdue(self.task_dao.db(), today)
            .await?;
        debug!(%today, count = tasks.len(), "listed overdue tasks");
        Ok(tasks
            .into_iter()
            .map(|model| TaskResponse::from_model(model, today))
            .collect())
    }

    pub async fn create_task(&self, input: NewTask) -> Result<TaskResponse, AppError> {
        let status = TaskStatus::or_default(input.status);
        let created = self
            .task_dao
            .create_task(
                self.task_dao.db(),
                &input.title,
                input.description.as_deref(),
                status,
                &input.assignee,
                input.due_date,
            )
            .await?;

        info!(task_id = created.id, status = created.status.as_str(), "task created");
        Ok(self.present_one(created))
    }

    /// Overwrites the status; any status may move to any other.
    pub async fn update_task_status(
        &self,
        id: i64,
        status: TaskStatus,
    ) -> Result<TaskResponse, AppError> {
        let txn = self.task_dao.begin().await?;
        let updated = self.task_dao.update_status(&txn, id, status).await?;
        txn.commit().await.map_err(DaoLayerError::Db)?;

        info!(task_id = id, status = status.as_str(), "task status updated");
        Ok(self.present_one(updated))
    }

    pub async fn update_task(&self, id: i64, content: TaskContent) -> Result<TaskResponse, AppError> {
        let txn = self.task_dao.begin().await?;
        let updated = self
            .task_dao
            .update_content(
                &txn,
                id,
                &content.title,
                content.description.as_deref(),
                content.due_date,
            )
            .await?;
        txn.commit().await.map_err(DaoLayerError::Db)?;

        info!(task_id = id, "task content updated");
        Ok(self.present_one(updated))
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), AppError> {
        self.task_dao.delete(self.task_dao.db(), id).await?;
        info!(task_id = id, "task deleted");
        Ok(())
    }
}
