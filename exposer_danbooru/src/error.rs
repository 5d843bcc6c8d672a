use danbooru_client::Error as ClientError;
use exposer_core::Error;

/// Sort client failures into the core taxonomy. Nothing is retried or swallowed here.
pub(crate) fn core_error(err: ClientError) -> Error {
    match err {
        ClientError::NetworkError(e) => Error::Transport(Box::new(e)),
        ClientError::UpstreamError { status, body } => Error::Upstream { status, body },
        ClientError::NotFound(what) => Error::ObjectNotFound(what),
        ClientError::JSONError(e) => Error::Decode(Box::new(e)),
        ClientError::JSONPathError(e) => Error::Decode(Box::new(e)),
        ClientError::UrlError(e) => Error::InvalidEndpoint(e.to_string()),
        ClientError::IOError(e) => Error::Other(e.into()),
    }
}
