use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use exposer_core::Error as ExposerError;

use crate::payload::ErrorResponse;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug)]
pub struct ServerError(anyhow::Error);

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        let status = self.status_code();
        let body = ErrorResponse { error: self.to_string() };
        (status, Json(body)).into_response()
    }
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        let err = &self.0;
        for cause in err.chain() {
            if let Some(err) = cause.downcast_ref::<ExposerError>() {
                match err {
                    ExposerError::ObjectNotFound(_) => return StatusCode::NOT_FOUND,
                    ExposerError::InvalidParameter(_) => return StatusCode::BAD_REQUEST,
                    ExposerError::Upstream { .. } => return StatusCode::BAD_GATEWAY,
                    ExposerError::Transport(_) => return StatusCode::BAD_GATEWAY,
                    ExposerError::Decode(_) => return StatusCode::BAD_GATEWAY,
                    _ => return StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_codes() {
        let status = |err: ExposerError| ServerError::from(err).status_code();
        assert_eq!(status(ExposerError::ObjectNotFound("Post 1".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(ExposerError::InvalidParameter("page".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(ExposerError::Upstream {
                status: 500,
                body: String::new()
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status(ExposerError::InvalidEndpoint("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ServerError::from(anyhow::anyhow!("other")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
