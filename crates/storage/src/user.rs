use gfl_core::PlayerId;
use gfl_core::Score;
use serde::Deserialize;
use serde::Serialize;

/// Username and password hash of a registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub name: String,
    pub hashword: String,
}

/// A known identity. Temporary users exist so spectators can join a
/// faction without signing up; they can upgrade to regular accounts
/// later without losing their identity or score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum User {
    Regular {
        id: PlayerId,
        display_name: String,
        credentials: Credentials,
    },
    Temporary { id: PlayerId, display_name: String },
}

impl User {
    pub fn id(&self) -> PlayerId {
        match self {
            Self::Regular { id, .. } | Self::Temporary { id, .. } => *id,
        }
    }
    pub fn display_name(&self) -> &str {
        match self {
            Self::Regular { display_name, .. } | Self::Temporary { display_name, .. } => {
                display_name
            }
        }
    }
    pub fn is_temporary(&self) -> bool {
        matches!(self, Self::Temporary { .. })
    }
    pub fn credentials(&self) -> Option<&Credentials> {
        match self {
            Self::Regular { credentials, .. } => Some(credentials),
            Self::Temporary { .. } => None,
        }
    }
    /// The same identity under a new display name.
    pub fn renamed(self, display_name: String) -> Self {
        match self {
            Self::Regular {
                id, credentials, ..
            } => Self::Regular {
                id,
                display_name,
                credentials,
            },
            Self::Temporary { id, .. } => Self::Temporary { id, display_name },
        }
    }
}

/// A user together with their persisted score — the unit the store
/// keeps in memory and writes to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserScore {
    pub user: User,
    pub score: Score,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renaming_preserves_identity() {
        let user = User::Temporary {
            id: PlayerId::default(),
            display_name: "Anonymous".to_string(),
        };
        let id = user.id();
        let renamed = user.renamed("Fresh Name".to_string());
        assert_eq!(renamed.id(), id);
        assert_eq!(renamed.display_name(), "Fresh Name");
    }
    #[test]
    fn only_regular_users_carry_credentials() {
        let regular = User::Regular {
            id: PlayerId::default(),
            display_name: "One".to_string(),
            credentials: Credentials {
                name: "one".to_string(),
                hashword: "argon2...".to_string(),
            },
        };
        let temporary = User::Temporary {
            id: PlayerId::default(),
            display_name: "Two".to_string(),
        };
        assert!(regular.credentials().is_some());
        assert!(temporary.credentials().is_none());
        assert!(temporary.is_temporary());
    }
}
