use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

pub type ApiResult<T> = Result<JsonApiResponse<T>, AppError>;

#[derive(Debug, Serialize)]
pub struct JsonApiResponse<T: Serialize> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> JsonApiResponse<T> {
    pub fn ok(data: T) -> ApiResult<T> {
        Ok(Self {
            status: StatusCode::OK.as_u16(),
            message: "ok".to_string(),
            data,
        })
    }

    pub fn with_status(status: StatusCode, message: impl Into<String>, data: T) -> ApiResult<T> {
        Ok(Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        })
    }
}

impl JsonApiResponse<serde_json::Value> {
    pub(crate) fn from_error(err: &AppError) -> Self {
        let status = status_for(err);
        let data = if err.field_errors().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::json!({ "errors": err.field_errors() })
        };
        Self {
            status: status.as_u16(),
            message: err.message().to_string(),
            data,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            log_app_error(&self, status);
        }
        JsonApiResponse::from_error(&self).into_response()
    }
}

impl<T: Serialize> IntoResponse for JsonApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status == StatusCode::NO_CONTENT {
            return status.into_response();
        }
        (status, Json(self)).into_response()
    }
}

pub(crate) fn log_app_error(err: &AppError, status: StatusCode) {
    tracing::error!(status = status.as_u16(), error = %err, "request failed");
}

pub(crate) fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::BadRequest(_) | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Conflict(_) => StatusCode::CONFLICT,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use axum::{body, http::StatusCode, response::IntoResponse};

    use super::JsonApiResponse;
    use crate::error::{AppError, FieldError};

    #[tokio::test]
    async fn validation_errors_carry_field_list() {
        let err = AppError::validation(vec![FieldError::new("title", "Title required")]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("body should be json");
        assert_eq!(json["status"], 400);
        assert_eq!(json["data"]["errors"][0]["field"], "title");
        assert_eq!(json["data"]["errors"][0]["message"], "Title required");
    }

    #[tokio::test]
    async fn no_content_has_empty_body() {
        let response = JsonApiResponse::with_status(
            StatusCode::NO_CONTENT,
            "deleted",
            serde_json::Value::Null,
        )
        .expect("response should build")
        .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        assert!(bytes.is_empty());
    }
}
