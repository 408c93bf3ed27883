use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SurrealDB error: {0}")]
    DbError(#[from] surrealdb::Error),
    #[error("Item not found.")]
    NotFound,
    #[error("Item was not created.")]
    NotCreated,
}
