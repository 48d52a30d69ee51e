use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    db::entities::TaskStatus,
    error::{AppError, FieldError},
    response::{ApiResult, JsonApiResponse},
    services::{NewTask, ServiceContext, TaskContent, TaskResponse, TaskService},
    state::AppState,
};

use super::validate::Validator;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusRequest {
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Deserialize)]
pub struct AssigneeQuery {
    pub status: Option<TaskStatus>,
}

impl CreateTaskRequest {
    fn into_new_task(self) -> Result<NewTask, AppError> {
        let mut v = Validator::new();
        let title = v.required("title", &self.title, "Title required");
        let description = v.description(self.description);
        let assignee = v.required("assignee", &self.assignee, "Assignee required");
        v.finish()?;

        Ok(NewTask {
            title,
            description,
            status: self.status,
            assignee,
            due_date: self.due_date,
        })
    }
}

impl UpdateTaskRequest {
    fn into_content(self) -> Result<TaskContent, AppError> {
        let mut v = Validator::new();
        let title = v.required("title", &self.title, "Title required");
        let description = v.description(self.description);
        v.finish()?;

        Ok(TaskContent {
            title,
            description,
            due_date: self.due_date,
        })
    }
}

impl UpdateTaskStatusRequest {
    fn into_status(self) -> Result<TaskStatus, AppError> {
        self.status.ok_or_else(|| {
            AppError::validation(vec![FieldError::new("status", "Status required")])
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/overdue", get(list_overdue))
        .route("/tasks/assignee/{assignee}", get(list_by_assignee))
        .route("/tasks/status/{status}", get(list_by_status))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/tasks/{id}/status", patch(update_status))
        .with_state(state)
}

async fn list_tasks(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TaskResponse>> {
    let tasks = task_service_from_state(state.as_ref()).list_tasks().await?;
    JsonApiResponse::ok(tasks)
}

async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<TaskResponse> {
    let task = task_service_from_state(state.as_ref()).get_task(id).await?;
    JsonApiResponse::ok(task)
}

async fn list_by_assignee(
    State(state): State<Arc<AppState>>,
    Path(assignee): Path<String>,
    Query(query): Query<AssigneeQuery>,
) -> ApiResult<Vec<TaskResponse>> {
    let service = task_service_from_state(state.as_ref());
    let tasks = match query.status {
        Some(status) => {
            service
                .list_tasks_by_assignee_and_status(&assignee, status)
                .await?
        }
        None => service.list_tasks_by_assignee(&assignee).await?,
    };
    JsonApiResponse::ok(tasks)
}

async fn list_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<TaskStatus>,
) -> ApiResult<Vec<TaskResponse>> {
    let tasks = task_service_from_state(state.as_ref())
        .list_tasks_by_status(status)
        .await?;
    JsonApiResponse::ok(tasks)
}

async fn list_overdue(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TaskResponse>> {
    let tasks = task_service_from_state(state.as_ref())
        .list_overdue_tasks()
        .await?;
    JsonApiResponse::ok(tasks)
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTaskRequest>,
) -> ApiResult<TaskResponse> {
    let input = body.into_new_task()?;
    let task = task_service_from_state(state.as_ref())
        .create_task(input)
        .await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", task)
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTaskStatusRequest>,
) -> ApiResult<TaskResponse> {
    let status = body.into_status()?;
    let task = task_service_from_state(state.as_ref())
        .update_task_status(id, status)
        .await?;
    JsonApiResponse::ok(task)
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTaskRequest>,
) -> ApiResult<TaskResponse> {
    let content = body.into_content()?;
    let task = task_service_from_state(state.as_ref())
        .update_task(id, content)
        .await?;
    JsonApiResponse::ok(task)
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    task_service_from_state(state.as_ref())
        .delete_task(id)
        .await?;
    JsonApiResponse::with_status(StatusCode::NO_CONTENT, "deleted", serde_json::Value::Null)
}

fn task_service_from_state(state: &AppState) -> TaskService {
    ServiceContext::from_state(state).task()
}
