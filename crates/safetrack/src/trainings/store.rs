/// Error taxonomy shared by the storage collaborators. Read paths in the
/// services degrade to empty results on `Unavailable` instead of failing
/// the request; write paths propagate it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("record not found")]
    NotFound,
}
