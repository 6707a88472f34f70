use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("User not authenticated")]
    Unauthenticated,

    #[error("identity provider error: {0}")]
    Identity(String),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("invalid file {file_name}: expected {expected}")]
    InvalidFile {
        file_name: String,
        expected: String,
    },
}
