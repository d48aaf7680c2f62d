//! Authorization gate: per-request admission control.
//!
//! Checks compose in a fixed order: bearer extraction, denylist lookup,
//! signature/structure, expiry, then the optional role whitelist. The
//! denylist is consulted *before* any cryptographic check so a
//! revoked-but-still-valid token is rejected as `Revoked`, and a denylist
//! outage rejects the request outright (fail closed) rather than assuming
//! "not revoked".
//!
//! The role inside an admitted token is the role at issuance; a later role
//! change on the principal does not reach outstanding tokens until they
//! expire or are revoked.

use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{AuthError, AuthResult};
use super::principal::Role;
use super::request_context::AuthContext;
use super::revocation::RevocationStore;
use super::token::TokenCodec;

#[derive(Clone)]
pub struct AuthorizationGate {
    codec: TokenCodec,
    revocations: Arc<dyn RevocationStore>,
}

impl AuthorizationGate {
    pub fn new(codec: TokenCodec, revocations: Arc<dyn RevocationStore>) -> Self {
        Self { codec, revocations }
    }

    /// Pull the bearer token out of `Authorization: Bearer <token>`.
    pub fn bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
        let value = headers
            .get("authorization")
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::MissingToken)?;
        let token = value.strip_prefix("Bearer ").ok_or(AuthError::MissingToken)?;
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        Ok(token)
    }

    /// Admission for any authenticated principal.
    pub async fn require_authenticated(&self, headers: &HeaderMap) -> AuthResult<AuthContext> {
        let token = Self::bearer_token(headers)?;
        self.admit_at(token, None, Utc::now()).await
    }

    /// Admission restricted to `allowed` roles.
    pub async fn require_role(
        &self,
        headers: &HeaderMap,
        allowed: &[Role],
    ) -> AuthResult<AuthContext> {
        let token = Self::bearer_token(headers)?;
        self.admit_at(token, Some(allowed), Utc::now()).await
    }

    /// Core admission pipeline with an explicit clock so expiry boundaries
    /// are testable.
    pub async fn admit_at(
        &self,
        token: &str,
        allowed: Option<&[Role]>,
        now: DateTime<Utc>,
    ) -> AuthResult<AuthContext> {
        if self.revocations.is_revoked(token).await? {
            debug!("admission rejected: token revoked");
            return Err(AuthError::Revoked);
        }

        let claims = self.codec.decode(token)?;

        if now.timestamp() >= claims.exp {
            debug!(user_id = %claims.sub, "admission rejected: token expired");
            return Err(AuthError::Expired);
        }

        let context = AuthContext {
            subject_id: claims.sub,
            subject_role: claims.role,
        };

        if let Some(allowed) = allowed {
            if !allowed.contains(&context.subject_role) {
                debug!(
                    user_id = %context.subject_id,
                    role = %context.subject_role,
                    "admission rejected: role not whitelisted"
                );
                return Err(AuthError::Forbidden);
            }
        }

        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_extraction() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(AuthorizationGate::bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn absent_header_is_missing_token() {
        let headers = HeaderMap::new();
        assert_eq!(
            AuthorizationGate::bearer_token(&headers),
            Err(AuthError::MissingToken)
        );
    }

    #[test]
    fn wrong_scheme_is_missing_token() {
        for value in ["Basic dXNlcjpwdw==", "Bearer", "Bearer ", "abc.def.ghi"] {
            let headers = headers_with(value);
            assert_eq!(
                AuthorizationGate::bearer_token(&headers),
                Err(AuthError::MissingToken),
                "value: {value}"
            );
        }
    }
}
