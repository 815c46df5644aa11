//! Permission and role value types.
//!
//! Permissions render to the backend's string grammar, e.g. `read("any")`
//! or `update("user:abc123")`. The adapter only forwards these values; the
//! backend is authoritative for what they mean.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A role a permission is granted to.
///
/// # Example
///
/// ```
/// use gangway_core::{Permission, Role};
///
/// let perm = Permission::read(Role::Any);
/// assert_eq!(perm.as_str(), r#"read("any")"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Role {
    /// Anyone, authenticated or not.
    Any,
    /// Unauthenticated users only.
    Guests,
    /// All authenticated users.
    Users,
    /// A specific user.
    User(String),
    /// Members of a specific team.
    Team(String),
    /// Users carrying a specific label.
    Label(String),
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Any => write!(f, "any"),
            Role::Guests => write!(f, "guests"),
            Role::Users => write!(f, "users"),
            Role::User(id) => write!(f, "user:{}", id),
            Role::Team(id) => write!(f, "team:{}", id),
            Role::Label(name) => write!(f, "label:{}", name),
        }
    }
}

/// One backend permission grant, stored in its wire string form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    fn grant(action: &str, role: &Role) -> Self {
        Self(format!(r#"{}("{}")"#, action, role))
    }

    /// Grant read access to a role.
    pub fn read(role: Role) -> Self {
        Self::grant("read", &role)
    }

    /// Grant write access to a role.
    pub fn write(role: Role) -> Self {
        Self::grant("write", &role)
    }

    /// Grant create access to a role.
    pub fn create(role: Role) -> Self {
        Self::grant("create", &role)
    }

    /// Grant update access to a role.
    pub fn update(role: Role) -> Self {
        Self::grant("update", &role)
    }

    /// Grant delete access to a role.
    pub fn delete(role: Role) -> Self {
        Self::grant("delete", &role)
    }

    /// Returns the wire string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_simple_roles() {
        assert_eq!(Permission::read(Role::Any).as_str(), r#"read("any")"#);
        assert_eq!(Permission::write(Role::Users).as_str(), r#"write("users")"#);
        assert_eq!(
            Permission::delete(Role::Guests).as_str(),
            r#"delete("guests")"#
        );
    }

    #[test]
    fn renders_parameterized_roles() {
        assert_eq!(
            Permission::update(Role::User("abc123".to_string())).as_str(),
            r#"update("user:abc123")"#
        );
        assert_eq!(
            Permission::read(Role::Team("editors".to_string())).as_str(),
            r#"read("team:editors")"#
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let perm = Permission::read(Role::Any);
        let json = serde_json::to_string(&perm).unwrap();
        assert_eq!(json, r#""read(\"any\")""#);
    }
}
