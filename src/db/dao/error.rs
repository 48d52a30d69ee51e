use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("{entity} not found (id={id})")]
    NotFound { entity: &'static str, id: i64 },
    #[error("{entity} violates a unique constraint: {detail}")]
    UniqueViolation { entity: &'static str, detail: String },
}

pub type DaoResult<T> = Result<T, DaoLayerError>;

impl DaoLayerError {
    /// Classifies a write error, pulling unique-constraint violations out of
    /// the generic database bucket.
    pub fn from_write(entity: &'static str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                DaoLayerError::UniqueViolation { entity, detail }
            }
            _ => DaoLayerError::Db(err),
        }
    }
}
