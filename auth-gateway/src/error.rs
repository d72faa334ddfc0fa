// auth-gateway/src/error.rs
use actix_web::http::StatusCode;
use actix_web::web::Bytes;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// The gateway's error taxonomy. Every route handler returns
/// `Result<HttpResponse, GatewayError>`; the `ResponseError` impl below
/// is the one uniform boundary converting each kind into a complete
/// HTTP response, so no handler ever leaves a request half-answered.
///
/// Display output never carries the credential or the session token.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The backend answered the login with an HTTP error; status and
    /// body are mirrored to the client exactly, no wrapping.
    #[error("backend returned status {status}")]
    Backend {
        status: StatusCode,
        content_type: Option<String>,
        body: Bytes,
    },

    /// No HTTP response was obtained from the backend at all. Fatal
    /// for the request; surfaced as a generic 500 and logged.
    #[error("backend transport failure")]
    Transport(#[from] reqwest::Error),

    /// The backend reported login success without issuing a session
    /// cookie. Should be unreachable under the backend contract; kept
    /// as a defensive guard.
    #[error("backend login succeeded without a session cookie")]
    MissingCredential,

    /// A protected route was accessed without a valid session cookie.
    #[error("invalid session")]
    Validation,
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Backend { status, .. } => *status,
            GatewayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::MissingCredential => StatusCode::UNAUTHORIZED,
            GatewayError::Validation => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            GatewayError::Backend {
                status,
                content_type,
                body,
            } => {
                let mut builder = HttpResponse::build(*status);
                if let Some(content_type) = content_type {
                    builder.content_type(content_type.as_str());
                }
                builder.body(body.clone())
            }
            GatewayError::Transport(e) => {
                tracing::error!("Backend transport failure: {}", e);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
            GatewayError::MissingCredential => {
                tracing::warn!("Backend login succeeded without a session cookie");
                HttpResponse::Unauthorized().body("Failed to authenticate")
            }
            GatewayError::Validation => HttpResponse::Unauthorized().json(json!({
                "error": "Invalid session"
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_backend_error_mirrors_status_and_body() {
        let err = GatewayError::Backend {
            status: StatusCode::UNAUTHORIZED,
            content_type: Some("application/json".to_string()),
            body: Bytes::from_static(b"{\"error\":\"bad credentials\"}"),
        };

        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(&body[..], b"{\"error\":\"bad credentials\"}");
    }

    #[actix_web::test]
    async fn test_missing_credential_is_fixed_401() {
        let err = GatewayError::MissingCredential;
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        assert_eq!(&body[..], b"Failed to authenticate");
    }

    #[actix_web::test]
    async fn test_validation_is_structured_401() {
        let err = GatewayError::Validation;
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Invalid session");
    }

    #[test]
    fn test_display_never_leaks_the_body() {
        let err = GatewayError::Backend {
            status: StatusCode::BAD_REQUEST,
            content_type: None,
            body: Bytes::from_static(b"secret-credential-material"),
        };
        assert!(!err.to_string().contains("secret"));
    }
}
