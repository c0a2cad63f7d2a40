/// Credential verification
///
/// The service authenticates against a fixed, in-memory credential list.
/// The `IdentityProvider` trait is the seam for swapping in an external
/// identity backend without touching the handlers.
use crate::models::{Identity, Role};

/// Verify a username/password pair and classify the caller.
pub trait IdentityProvider: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> Option<Identity>;
}

struct Credential {
    id: i32,
    username: &'static str,
    password: &'static str,
    role: Role,
}

/// Fixed credential list. Passwords are stored in clear; there is no
/// persistence, hashing, rate limiting, or lockout.
pub struct StaticCredentialStore {
    users: Vec<Credential>,
}

impl StaticCredentialStore {
    pub fn new() -> Self {
        Self {
            users: vec![
                Credential {
                    id: 1,
                    username: "admin",
                    password: "password",
                    role: Role::Admin,
                },
                Credential {
                    id: 2,
                    username: "normal",
                    password: "password",
                    role: Role::Normal,
                },
                Credential {
                    id: 3,
                    username: "limited",
                    password: "password",
                    role: Role::Limited,
                },
            ],
        }
    }
}

impl Default for StaticCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for StaticCredentialStore {
    fn verify(&self, username: &str, password: &str) -> Option<Identity> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .map(|u| Identity {
                id: u.id,
                username: u.username.to_string(),
                role: u.role,
            })
    }
}
