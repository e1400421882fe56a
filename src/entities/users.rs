use std::fmt;

use sqlx::prelude::FromRow;

use super::RowId;

/// User model, restricted to the identifying columns
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: RowId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub auth_id: Option<String>,
    pub device_token: Option<String>,
}

/// A known login: email plus the external auth identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub auth_id: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, auth_id: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            auth_id: auth_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Superadmin,
    OrganizationAdmin,
    OrganizationMember,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Superadmin => "superadmin",
            Self::OrganizationAdmin => "admin",
            Self::OrganizationMember => "user",
        })
    }
}

/// A credential written onto one user row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialAssignment {
    pub role: Role,
    pub organization_id: Option<RowId>,
    pub user_id: RowId,
    pub credential: Credential,
}
