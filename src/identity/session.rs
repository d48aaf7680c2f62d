//! Session authority: credential-to-token issuance and token-to-revocation
//! teardown.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AuthError, AuthResult};
use crate::security;
use super::credentials::CredentialStore;
use super::principal::PublicUser;
use super::revocation::RevocationStore;
use super::token::TokenCodec;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

pub struct SessionAuthority {
    codec: TokenCodec,
    credentials: Arc<dyn CredentialStore>,
    revocations: Arc<dyn RevocationStore>,
}

impl SessionAuthority {
    pub fn new(
        codec: TokenCodec,
        credentials: Arc<dyn CredentialStore>,
        revocations: Arc<dyn RevocationStore>,
    ) -> Self {
        Self {
            codec,
            credentials,
            revocations,
        }
    }

    /// Verify credentials and issue a token carrying the principal's current
    /// id and role. "No such identifier" and "wrong password" are folded into
    /// one `Unauthorized`; only a credential-store fault is reported
    /// differently (`StoreUnavailable`).
    pub async fn login(&self, req: &LoginRequest) -> AuthResult<LoginResponse> {
        let principal = self
            .credentials
            .find_by_identifier(&req.identifier)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !security::verify_password(&principal.password_hash, &req.password) {
            warn!(user_id = %principal.id, "login rejected: bad credentials");
            return Err(AuthError::Unauthorized);
        }

        let token = self.codec.encode(&principal.id, principal.role)?;
        info!(user_id = %principal.id, role = %principal.role, "login");
        Ok(LoginResponse {
            token,
            user: principal.public(),
        })
    }

    /// Revoke a token by writing it into the denylist with its remaining
    /// life as TTL. Tolerant on input: an expired-but-genuine token is
    /// accepted, an unparsable or already-dead one is a no-op. Idempotent:
    /// a second call rewrites the entry with an equal or smaller TTL.
    pub async fn logout(&self, token: &str) -> AuthResult<()> {
        self.logout_at(token, Utc::now()).await
    }

    pub async fn logout_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<()> {
        // Signature must still verify; a token nobody could ever present
        // successfully needs no denylist entry.
        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(_) => return Ok(()),
        };

        let remaining = TokenCodec::remaining_ttl(&claims, now);
        if remaining == 0 {
            return Ok(());
        }

        self.revocations.revoke(token, remaining as u64).await?;
        info!(user_id = %claims.sub, "logout");
        Ok(())
    }
}
