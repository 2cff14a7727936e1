use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Maps an insert failure, turning unique-constraint violations into [`AppError::Conflict`].
    pub fn from_insert(err: sqlx::Error, what: &str) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(format!("{what} already exists: {}", db_err.message()))
            }
            _ => AppError::Database(err),
        }
    }
}
