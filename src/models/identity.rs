/// Request-scoped identity
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Access level carried inside the token, fixed at issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Normal,
    Limited,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Normal => write!(f, "normal"),
            Role::Limited => write!(f, "limited"),
        }
    }
}

/// Identity decoded from a validated token. Never persisted server-side.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: i32,
    pub username: String,
    pub role: Role,
}
