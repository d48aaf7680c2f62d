//! Central identity handling: principals, session tokens, revocation and the
//! request-admission gate. Keep the public surface thin and split
//! implementation across sub-modules.

mod principal;
mod token;
mod credentials;
mod revocation;
mod session;
mod request_context;
mod gate;

pub use principal::{Principal, PublicUser, Role};
pub use token::{Claims, TokenCodec, TOKEN_TTL_SECS};
pub use credentials::{CredentialStore, MemoryCredentialStore};
pub use revocation::{MemoryRevocationStore, RedisRevocationStore, RevocationStore};
pub use session::{LoginRequest, LoginResponse, SessionAuthority};
pub use request_context::AuthContext;
pub use gate::AuthorizationGate;
