//! User models.

use serde::Deserialize;

/// A role assigned to a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
}

/// An authenticated Axiom user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Unique id of the user.
    pub id: String,
    /// Display name of the user.
    pub name: String,
    /// Email address of the user.
    pub email: String,
    /// The user's role.
    pub role: Role,
}
