//! Signed-in identity

use serde::{Deserialize, Serialize};

/// Display name used for the admin identity
pub const ADMIN_DISPLAY_NAME: &str = "Super Admin";

/// Profile returned by `GET /auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub agent_id: String,
    pub name: String,
    pub mobile: String,
}

/// Role of the signed-in identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Agent,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Agent => write!(f, "agent"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// The current authenticated identity
///
/// An agent identity always comes from the server profile. An admin
/// identity is only installed after the admin-only stats endpoint accepted
/// the session, since the API has no admin profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Agent(AgentProfile),
    Admin { name: String },
}

impl Identity {
    /// Admin identity with the standard display name
    pub fn admin() -> Self {
        Identity::Admin {
            name: ADMIN_DISPLAY_NAME.to_string(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Identity::Agent(_) => Role::Agent,
            Identity::Admin { .. } => Role::Admin,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Identity::Agent(profile) => &profile.name,
            Identity::Admin { name } => name,
        }
    }

    pub fn mobile(&self) -> Option<&str> {
        match self {
            Identity::Agent(profile) => Some(&profile.mobile),
            Identity::Admin { .. } => None,
        }
    }

    pub fn agent_id(&self) -> Option<&str> {
        match self {
            Identity::Agent(profile) => Some(&profile.agent_id),
            Identity::Admin { .. } => None,
        }
    }

    /// Agent profile, if this is an agent
    pub fn profile(&self) -> Option<&AgentProfile> {
        match self {
            Identity::Agent(profile) => Some(profile),
            Identity::Admin { .. } => None,
        }
    }
}

impl From<AgentProfile> for Identity {
    fn from(profile: AgentProfile) -> Self {
        Identity::Agent(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserialize() {
        let json = r#"{"agent_id":"a-1","name":"Ravi","mobile":"9876543210"}"#;
        let profile: AgentProfile = serde_json::from_str(json).unwrap();
        let identity = Identity::from(profile);

        assert_eq!(identity.role(), Role::Agent);
        assert_eq!(identity.name(), "Ravi");
        assert_eq!(identity.agent_id(), Some("a-1"));
    }

    #[test]
    fn test_admin_identity() {
        let identity = Identity::admin();
        assert_eq!(identity.role(), Role::Admin);
        assert_eq!(identity.name(), "Super Admin");
        assert!(identity.mobile().is_none());
        assert!(identity.profile().is_none());
    }
}
