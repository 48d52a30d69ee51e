use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::member::{self, MemberRole};
use crate::db::entities::prelude::Member;

#[derive(Clone)]
pub struct MemberDao {
    db: DatabaseConnection,
}

impl DaoBase for MemberDao {
    type Entity = Member;
    const ENTITY_NAME: &'static str = "Member";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl MemberDao {
    pub async fn find_by_email<C>(
        &self,
        conn: &C,
        email: &str,
    ) -> DaoResult<Option<member::Model>>
    where
        C: ConnectionTrait,
    {
        Member::find()
            .filter(member::Column::Email.eq(email))
            .one(conn)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn exists_by_email<C>(&self, conn: &C, email: &str) -> DaoResult<bool>
    where
        C: ConnectionTrait,
    {
        Ok(self.find_by_email(conn, email).await?.is_some())
    }

    pub async fn find_by_department<C>(
        &self,
        conn: &C,
        department: &str,
    ) -> DaoResult<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        let condition = Condition::all().add(member::Column::Department.eq(department));
        self.find_where(conn, condition).await
    }

    /// Inserts a member. A duplicate email surfaces as
    /// [`DaoLayerError::UniqueViolation`] from the column constraint.
    pub async fn create_member<C>(
        &self,
        conn: &C,
        email: &str,
        name: &str,
        role: MemberRole,
        department: Option<&str>,
    ) -> DaoResult<member::Model>
    where
        C: ConnectionTrait,
    {
        let model = member::ActiveModel {
            email: Set(email.to_string()),
            name: Set(name.to_string()),
            role: Set(role),
            department: Set(department.map(str::to_string)),
            ..Default::default()
        };
        self.create(conn, model).await
    }
}
