//! Unified authentication/authorization error model.
//!
//! Every failure a request can hit on its way through login, logout or the
//! authorization gate is one of these variants. All of them are terminal for
//! the current request; none are retried internally. Client-facing messages
//! stay generic on purpose: `Unauthorized` never says whether the identifier
//! or the password was wrong, and `StoreUnavailable` never names a host.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Bad credentials at login. Deliberately undifferentiated so the
    /// endpoint cannot be used to enumerate identifiers.
    #[error("invalid credentials")]
    Unauthorized,

    /// No bearer token on a protected request.
    #[error("no token provided")]
    MissingToken,

    /// Token structure could not be parsed.
    #[error("malformed token")]
    Malformed,

    /// Token parsed but the signature does not verify.
    #[error("invalid token")]
    InvalidSignature,

    /// Token is authentic but past its expiry.
    #[error("token expired")]
    Expired,

    /// Token is on the logout denylist.
    #[error("token revoked")]
    Revoked,

    /// Authenticated, but the role is not in the whitelist for this operation.
    #[error("forbidden: insufficient permissions")]
    Forbidden,

    /// A backing store could not be reached in time. The gate fails closed on
    /// this: it is never downgraded to "assume not revoked".
    #[error("authentication service unavailable")]
    StoreUnavailable,
}

impl AuthError {
    /// Stable machine-readable code for logs and response bodies.
    pub fn code_str(&self) -> &'static str {
        match self {
            AuthError::Unauthorized => "unauthorized",
            AuthError::MissingToken => "missing_token",
            AuthError::Malformed => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "token_expired",
            AuthError::Revoked => "token_revoked",
            AuthError::Forbidden => "forbidden",
            AuthError::StoreUnavailable => "store_unavailable",
        }
    }

    /// Map to HTTP status code.
    pub fn http_status(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized
            | AuthError::MissingToken
            | AuthError::Malformed
            | AuthError::InvalidSignature
            | AuthError::Expired
            | AuthError::Revoked => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            // 503 keeps "database down" distinguishable from "bad password"
            // in monitoring without leaking detail to the client.
            AuthError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.to_string(), "code": self.code_str() });
        (self.http_status(), Json(body)).into_response()
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_mapping() {
        assert_eq!(AuthError::Unauthorized.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::MissingToken.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Malformed.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidSignature.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Expired.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Revoked.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Forbidden.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::StoreUnavailable.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn messages_stay_generic() {
        // Login failures must not reveal which half of the credential pair was wrong.
        let msg = AuthError::Unauthorized.to_string();
        assert!(!msg.contains("password"));
        assert!(!msg.contains("user"));
        // Store outages must not leak internals.
        assert!(!AuthError::StoreUnavailable.to_string().contains("redis"));
    }
}
