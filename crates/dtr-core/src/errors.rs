/// Core error type for the relay.
///
/// Adapter crates should map their platform errors into this type so the
/// relay core can log and drop failures consistently. No error here is
/// retried and none crashes the process.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("destination sink error: {0}")]
    Sink(String),

    #[error("source feed error: {0}")]
    Source(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
