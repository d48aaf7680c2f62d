//! storerate HTTP server
//! ---------------------
//! Axum-based API for the auth core. Responsibilities:
//! - Login/logout endpoints backed by the `identity` module.
//! - Role-gated mount points for the rating application's collaborators:
//!   `/api/user` (any authenticated principal), `/api/owner` (OWNER),
//!   `/api/admin` (ADMIN). The CRUD and dashboard handlers themselves live in
//!   collaborating services; the endpoints here return the admitted context
//!   those handlers would receive.
//!
//! Tokens travel only in the `Authorization: Bearer` header; there is no
//! cookie or other ambient session state on either side.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
};
use serde_json::json;
use tracing::info;

use crate::config::Config;
use crate::error::AuthResult;
use crate::identity::{
    AuthContext, AuthorizationGate, CredentialStore, LoginRequest, LoginResponse,
    MemoryCredentialStore, RedisRevocationStore, RevocationStore, Role, SessionAuthority,
    TokenCodec,
};

/// Shared server state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub authority: Arc<SessionAuthority>,
    pub gate: AuthorizationGate,
}

impl AppState {
    pub fn new(
        codec: TokenCodec,
        credentials: Arc<dyn CredentialStore>,
        revocations: Arc<dyn RevocationStore>,
    ) -> Self {
        let authority = Arc::new(SessionAuthority::new(
            codec.clone(),
            credentials,
            revocations.clone(),
        ));
        let gate = AuthorizationGate::new(codec, revocations);
        Self { authority, gate }
    }
}

/// Mount all routes onto a router. Split out so tests can serve the same app
/// on an ephemeral port.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "storerate ok" }))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/user/me", get(user_me))
        .route("/api/owner/dashboard", get(owner_dashboard))
        .route("/api/admin/dashboard", get(admin_dashboard))
        .with_state(state)
}

/// Start the HTTP server with the process configuration. The credential store
/// wired here is the in-memory seam; a deployment embeds this crate and
/// supplies its own store via [`AppState::new`].
pub async fn run() -> anyhow::Result<()> {
    let config = Config::load();

    let revocations = Arc::new(RedisRevocationStore::connect(&config.redis_url).await?);
    let credentials = MemoryCredentialStore::new();
    let state = AppState::new(
        TokenCodec::new(&config.token_secret),
        credentials,
        revocations,
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>> {
    let response = state.authority.login(&payload).await?;
    Ok(Json(response))
}

async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AuthResult<Json<serde_json::Value>> {
    let token = AuthorizationGate::bearer_token(&headers)?;
    state.authority.logout(token).await?;
    Ok(Json(json!({ "message": "Logged out successfully" })))
}

async fn user_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AuthResult<Json<AuthContext>> {
    let context = state.gate.require_authenticated(&headers).await?;
    Ok(Json(context))
}

async fn owner_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AuthResult<Json<serde_json::Value>> {
    let context = state.gate.require_role(&headers, &[Role::Owner]).await?;
    Ok(Json(json!({ "subject": context })))
}

async fn admin_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AuthResult<Json<serde_json::Value>> {
    let context = state.gate.require_role(&headers, &[Role::Admin]).await?;
    Ok(Json(json!({ "subject": context })))
}
