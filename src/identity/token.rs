//! Session token codec.
//!
//! Tokens are HS256 JWTs over a process-wide secret, carrying the principal's
//! id and role plus issue/expiry timestamps. The codec answers exactly one
//! question, "is this token authentic and parseable", and deliberately does
//! not check expiry: liveness is the authorization gate's call, so a caller
//! like logout can still read an expired-but-genuine token.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};
use super::principal::Role;

/// Fixed token lifetime: one day from issuance, not configurable per call.
pub const TOKEN_TTL_SECS: i64 = 86_400;

/// Signed claims. The signature covers the exact serialized form of these
/// fields, so changing `role` (or anything else) without re-signing
/// invalidates the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Principal id.
    pub sub: String,
    /// Role at issuance time. Authoritative for the token's lifetime even if
    /// the principal's stored role changes later.
    pub role: Role,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch; always `iat + TOKEN_TTL_SECS`.
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by the gate, not here.
        validation.validate_exp = false;
        validation.required_spec_claims = Default::default();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Encode a token issued at `now`. Pure: same inputs, same secret, same
    /// token.
    pub fn encode_at(&self, subject_id: &str, role: Role, now: DateTime<Utc>) -> AuthResult<String> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: subject_id.to_string(),
            role,
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            // Serialization of these claims cannot fail with a well-formed
            // secret; treat a codec fault as a malformed-token condition.
            .map_err(|_| AuthError::Malformed)
    }

    pub fn encode(&self, subject_id: &str, role: Role) -> AuthResult<String> {
        self.encode_at(subject_id, role, Utc::now())
    }

    /// Verify authenticity and structure. Never consults the clock.
    pub fn decode(&self, token: &str) -> AuthResult<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::Malformed,
            })
    }

    /// Remaining seconds of validity at `now`, clamped at zero.
    pub fn remaining_ttl(claims: &Claims, now: DateTime<Utc>) -> i64 {
        (claims.exp - now.timestamp()).max(0)
    }
}
