use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("League file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Problem parsing league: {0}")]
    Corrupt(String),

    #[error("Database error: {0}")]
    Database(String),
}

