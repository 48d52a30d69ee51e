use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IntoActiveModel, PrimaryKeyTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use super::base_traits::{HasIdColumn, TimestampedActiveModel};
use super::error::{DaoLayerError, DaoResult};

type Model<D> = <<D as DaoBase>::Entity as EntityTrait>::Model;
type ActiveModel<D> = <<D as DaoBase>::Entity as EntityTrait>::ActiveModel;

/// Generic single-entity persistence keyed by an `i64` surrogate id.
///
/// Every operation takes the connection to run on, so callers can pass the
/// pooled connection from [`DaoBase::db`] or an open transaction from
/// [`DaoBase::begin`].
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model:
        IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send + Sync,
    <Self::Entity as EntityTrait>::ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + TimestampedActiveModel
        + Send,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<i64> + Send + Sync,
{
    type Entity: EntityTrait + HasIdColumn + Send + Sync;
    const ENTITY_NAME: &'static str;

    fn from_db(db: DatabaseConnection) -> Self;

    fn new(db: &DatabaseConnection) -> Self {
        Self::from_db(db.clone())
    }

    fn db(&self) -> &DatabaseConnection;

    async fn begin(&self) -> DaoResult<DatabaseTransaction> {
        self.db().begin().await.map_err(DaoLayerError::Db)
    }

    async fn create<C>(
        &self,
        conn: &C,
        data: impl IntoActiveModel<ActiveModel<Self>> + Send,
    ) -> DaoResult<Model<Self>>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now().fixed_offset();
        let mut active = data.into_active_model();
        active.set_created_at(now);
        active.set_updated_at(now);
        active
            .insert(conn)
            .await
            .map_err(|err| DaoLayerError::from_write(Self::ENTITY_NAME, err))
    }

    async fn find_by_id<C>(&self, conn: &C, id: i64) -> DaoResult<Option<Model<Self>>>
    where
        C: ConnectionTrait,
    {
        Self::Entity::find_by_id(id)
            .one(conn)
            .await
            .map_err(DaoLayerError::Db)
    }

    async fn require_by_id<C>(&self, conn: &C, id: i64) -> DaoResult<Model<Self>>
    where
        C: ConnectionTrait,
    {
        self.find_by_id(conn, id)
            .await?
            .ok_or(DaoLayerError::NotFound {
                entity: Self::ENTITY_NAME,
                id,
            })
    }

    async fn find_all<C>(&self, conn: &C) -> DaoResult<Vec<Model<Self>>>
    where
        C: ConnectionTrait,
    {
        self.find_where(conn, Condition::all()).await
    }

    async fn find_where<C>(&self, conn: &C, condition: Condition) -> DaoResult<Vec<Model<Self>>>
    where
        C: ConnectionTrait,
    {
        Self::Entity::find()
            .filter(condition)
            .order_by_asc(Self::Entity::id_column())
            .all(conn)
            .await
            .map_err(DaoLayerError::Db)
    }

    async fn update<C, F>(&self, conn: &C, id: i64, apply: F) -> DaoResult<Model<Self>>
    where
        C: ConnectionTrait,
        F: for<'a> FnOnce(&'a mut ActiveModel<Self>) + Send,
    {
        let model = self.require_by_id(conn, id).await?;

        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());

        active
            .update(conn)
            .await
            .map_err(|err| DaoLayerError::from_write(Self::ENTITY_NAME, err))
    }

    async fn delete<C>(&self, conn: &C, id: i64) -> DaoResult<i64>
    where
        C: ConnectionTrait,
    {
        let result = Self::Entity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(DaoLayerError::Db)?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: Self::ENTITY_NAME,
                id,
            });
        }

        Ok(id)
    }
}
