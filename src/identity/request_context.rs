use serde::Serialize;

use super::principal::Role;

/// Identity attached to a request once the gate has admitted it. This is what
/// downstream handlers (store CRUD, dashboards) see; they never re-derive the
/// role themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthContext {
    pub subject_id: String,
    pub subject_role: Role,
}
