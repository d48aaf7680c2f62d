use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed role enumeration. Anything outside these three values is rejected
/// wherever a role is parsed, never silently accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Owner,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Owner => "OWNER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "OWNER" => Ok(Role::Owner),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A registered actor as held by the credential store. The password hash is
/// internal state: it is never serialized into a response and never logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

impl Principal {
    /// The only projection of a principal that leaves the process.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_strict() {
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert_eq!("OWNER".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("admin".parse::<Role>().is_err());
        assert!("ROOT".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn role_serde_uses_uppercase_wire_values() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"OWNER\"");
        let r: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(r, Role::Admin);
        assert!(serde_json::from_str::<Role>("\"SUPERUSER\"").is_err());
    }

    #[test]
    fn public_projection_drops_the_hash() {
        let p = Principal {
            id: "u-1".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            role: Role::User,
            password_hash: "$argon2id$...".into(),
        };
        let public = p.public();
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("hash"));
        assert_eq!(public.role, Role::User);
    }
}
