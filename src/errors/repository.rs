use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Connection, pool or query failures
    #[error("Database error: {0}")]
    Database(SqlxError),

    /// No row matched a write that expected one
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Conflict error: {0}")]
    Conflict(String),

    /// Row rejected by a constraint
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::RowNotFound => Self::NotFound("Resource not found".to_string()),
            SqlxError::Database(db_err) => {
                // PostgreSQL SQLSTATE codes
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        // unique_violation, e.g. the urls.alias index
                        "23505" => return Self::Conflict("Alias already assigned".to_string()),
                        // not_null_violation
                        "23502" => return Self::InvalidData("Missing required column".to_string()),
                        // check_violation
                        "23514" => {
                            return Self::InvalidData("Data violates constraints".to_string())
                        }
                        _ => {}
                    }
                }
                Self::Database(SqlxError::Database(db_err))
            }
            _ => Self::Database(err),
        }
    }
}
