use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    /// DNS, connect or timeout failure before a response arrived.
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),
    /// The upstream answered with a status other than 200.
    #[error("Upstream request failed with status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("Object `{0}` not found")]
    ObjectNotFound(String),
    /// The upstream body was not the JSON shape we expect.
    #[error("Cannot decode upstream response: {0}")]
    Decode(#[source] BoxError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
