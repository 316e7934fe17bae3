use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    /// The tokenizer rejected the document. No partial result is produced.
    #[error("Malformed document: {0}")]
    MalformedDocument(#[from] xml::reader::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parser task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ParseError>;
