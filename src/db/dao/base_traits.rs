use sea_orm::entity::prelude::DateTimeWithTimeZone;

pub trait HasIdColumn: sea_orm::EntityTrait {
    fn id_column() -> Self::Column;
}

/// Timestamp hooks stamped by [`DaoBase`](super::DaoBase) on create and
/// update. Entities without an `updated_at` column keep the default no-op.
pub trait TimestampedActiveModel {
    fn set_created_at(&mut self, ts: DateTimeWithTimeZone);

    fn set_updated_at(&mut self, _ts: DateTimeWithTimeZone) {}
}
