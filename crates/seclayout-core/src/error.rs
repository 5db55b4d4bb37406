pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read graph payload: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("graph data is incomplete: no nodes found")]
    NoNodes,

    #[error("duplicate node id: {id}")]
    DuplicateNodeId { id: String },

    #[error("invalid layout options: {message}")]
    InvalidOptions { message: String },
}
