use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Customer '{id}' not found")]
    CustomerNotFound { id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type CrmResult<T> = Result<T, CrmError>;
