use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    db::dao::{DaoBase, DaoLayerError, MemberDao},
    db::entities::member::{self, MemberRole},
    error::AppError,
};

/// Validated input for [`MemberService::create_member`].
#[derive(Debug, Clone)]
pub struct NewMember {
    pub email: String,
    pub name: String,
    pub role: Option<MemberRole>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: MemberRole,
    pub department: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

impl From<member::Model> for MemberResponse {
    fn from(model: member::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            role: model.role,
            department: model.department,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone)]
pub struct MemberService {
    member_dao: MemberDao,
}

impl MemberService {
    pub fn new(member_dao: MemberDao) -> Self {
        Self { member_dao }
    }

    pub async fn list_members(&self) -> Result<Vec<MemberResponse>, AppError> {
        let members = self.member_dao.find_all(self.member_dao.db()).await?;
        debug!(count = members.len(), "listed members");
        Ok(members.into_iter().map(MemberResponse::from).collect())
    }

    pub async fn get_member(&self, id: i64) -> Result<MemberResponse, AppError> {
        let member = self.member_dao.require_by_id(self.member_dao.db(), id).await?;
        Ok(member.into())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<MemberResponse>, AppError> {
        let member = self
            .member_dao
            .find_by_email(self.member_dao.db(), email)
            .await?;
        Ok(member.map(MemberResponse::from))
    }

    pub async fn list_members_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<MemberResponse>, AppError> {
        let members = self
            .member_dao
            .find_by_department(self.member_dao.db(), department)
            .await?;
        Ok(members.into_iter().map(MemberResponse::from).collect())
    }

    /// Creates a member, defaulting the role to MEMBER.
    ///
    /// The `exists_by_email` lookup is only a fast path: two concurrent
    /// requests can both pass it. The unique index on `members.email` is
    /// what rejects the loser, and that violation is reported as the same
    /// conflict.
    pub async fn create_member(&self, input: NewMember) -> Result<MemberResponse, AppError> {
        let NewMember {
            email,
            name,
            role,
            department,
        } = input;
        let role = MemberRole::or_default(role);

        let txn = self.member_dao.begin().await?;
        if self.member_dao.exists_by_email(&txn, &email).await? {
            return Err(duplicate_email(&email));
        }

        let created = self
            .member_dao
            .create_member(&txn, &email, &name, role, department.as_deref())
            .await
            .map_err(|err| insert_error(&email, err))?;
        txn.commit().await.map_err(DaoLayerError::Db)?;

        info!(member_id = created.id, role = ?created.role, "member created");
        Ok(created.into())
    }
}

fn duplicate_email(email: &str) -> AppError {
    AppError::conflict(format!("Email already exists: {email}"))
}

fn insert_error(email: &str, err: DaoLayerError) -> AppError {
    match err {
        DaoLayerError::UniqueViolation { .. } => duplicate_email(email),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    use super::{NewMember, insert_error};
    use crate::{
        db::dao::DaoLayerError,
        db::entities::member::{self, MemberRole},
        error::AppError,
        services::ServiceContext,
    };

    fn ts() -> chrono::DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn member_model(id: i64, email: &str, role: MemberRole) -> member::Model {
        member::Model {
            id,
            email: email.to_string(),
            name: "Kim".to_string(),
            role,
            department: None,
            created_at: ts(),
        }
    }

    fn new_member(email: &str, role: Option<MemberRole>) -> NewMember {
        NewMember {
            email: email.to_string(),
            name: "Kim".to_string(),
            role,
            department: None,
        }
    }

    #[tokio::test]
    async fn create_member_defaults_role_to_member() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<member::Model>::new()])
            .append_query_results([[member_model(1, "kim@example.com", MemberRole::Member)]])
            .into_connection();
        let service = ServiceContext::new(&db).member();

        let created = service
            .create_member(new_member("kim@example.com", None))
            .await
            .expect("create should succeed");

        assert_eq!(created.id, 1);
        assert_eq!(created.role, MemberRole::Member);
        assert!(!created.role.is_admin());
    }

    #[tokio::test]
    async fn create_member_rejects_existing_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[member_model(1, "kim@example.com", MemberRole::Member)]])
            .into_connection();
        let service = ServiceContext::new(&db).member();

        let err = service
            .create_member(new_member("kim@example.com", Some(MemberRole::Admin)))
            .await
            .expect_err("duplicate email should fail");

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.message(), "Email already exists: kim@example.com");
    }

    #[tokio::test]
    async fn get_member_reports_missing_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<member::Model>::new()])
            .into_connection();
        let service = ServiceContext::new(&db).member();

        let err = service.get_member(404).await.expect_err("lookup should fail");

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.message(), "Member not found (id=404)");
    }

    #[tokio::test]
    async fn list_members_surfaces_storage_failures_as_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let service = ServiceContext::new(&db).member();

        let err = service.list_members().await.expect_err("list should fail");

        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn find_by_email_maps_to_response() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[member_model(9, "lee@example.com", MemberRole::Admin)]])
            .into_connection();
        let service = ServiceContext::new(&db).member();

        let found = service
            .find_by_email("lee@example.com")
            .await
            .expect("lookup should succeed")
            .expect("member should exist");

        assert_eq!(found.id, 9);
        assert!(found.role.is_admin());
    }

    #[test]
    fn unique_index_violation_reads_like_the_precheck() {
        let err = insert_error(
            "kim@example.com",
            DaoLayerError::UniqueViolation {
                entity: "Member",
                detail: "UNIQUE constraint failed: members.email".to_string(),
            },
        );

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.message(), "Email already exists: kim@example.com");

        let other = insert_error(
            "kim@example.com",
            DaoLayerError::Db(DbErr::Custom("disk I/O error".to_string())),
        );
        assert!(matches!(other, AppError::Internal(_)));
    }
}
