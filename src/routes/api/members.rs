use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use crate::{
    db::entities::MemberRole,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    services::{MemberResponse, MemberService, NewMember, ServiceContext},
    state::AppState,
};

use super::validate::{Validator, optional_trimmed};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: Option<MemberRole>,
    pub department: Option<String>,
}

impl CreateMemberRequest {
    fn into_new_member(self) -> Result<NewMember, AppError> {
        let mut v = Validator::new();
        let email = v.email("email", &self.email);
        let name = v.required("name", &self.name, "Name required");
        v.finish()?;

        Ok(NewMember {
            email,
            name,
            role: self.role,
            department: optional_trimmed(self.department),
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/members", get(list_members).post(create_member))
        .route("/members/{id}", get(get_member))
        .route("/members/department/{department}", get(list_by_department))
        .with_state(state)
}

async fn list_members(State(state): State<Arc<AppState>>) -> ApiResult<Vec<MemberResponse>> {
    let members = member_service_from_state(state.as_ref()).list_members().await?;
    JsonApiResponse::ok(members)
}

async fn get_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<MemberResponse> {
    let member = member_service_from_state(state.as_ref()).get_member(id).await?;
    JsonApiResponse::ok(member)
}

async fn create_member(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateMemberRequest>,
) -> ApiResult<MemberResponse> {
    let input = body.into_new_member()?;
    let member = member_service_from_state(state.as_ref())
        .create_member(input)
        .await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", member)
}

async fn list_by_department(
    State(state): State<Arc<AppState>>,
    Path(department): Path<String>,
) -> ApiResult<Vec<MemberResponse>> {
    let members = member_service_from_state(state.as_ref())
        .list_members_by_department(&department)
        .await?;
    JsonApiResponse::ok(members)
}

fn member_service_from_state(state: &AppState) -> MemberService {
    ServiceContext::from_state(state).member()
}

#[cfg(test)]
mod tests {
    use super::CreateMemberRequest;
    use crate::{db::entities::MemberRole, error::AppError};

    fn request(json: serde_json::Value) -> CreateMemberRequest {
        serde_json::from_value(json).expect("request should deserialize")
    }

    #[test]
    fn trims_fields_and_drops_blank_department() {
        let input = request(serde_json::json!({
            "email": " kim@example.com ",
            "name": " Kim ",
            "role": "ADMIN",
            "department": "  "
        }))
        .into_new_member()
        .expect("request should validate");

        assert_eq!(input.email, "kim@example.com");
        assert_eq!(input.name, "Kim");
        assert_eq!(input.role, Some(MemberRole::Admin));
        assert_eq!(input.department, None);
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let err = request(serde_json::json!({}))
            .into_new_member()
            .expect_err("empty request should fail");

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.message(), "email: Email required; name: Name required");
    }

    #[test]
    fn unknown_role_is_a_deserialization_error() {
        let parsed = serde_json::from_value::<CreateMemberRequest>(serde_json::json!({
            "email": "kim@example.com",
            "name": "Kim",
            "role": "OWNER"
        }));
        assert!(parsed.is_err());
    }
}
