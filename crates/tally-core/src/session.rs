//! # Session
//!
//! The caller's identity, passed explicitly into every operation that needs
//! authorization. There is no ambient "current user".
//!
//! ```text
//! Session::anonymous()      role = None      → only unauthenticated reads
//! Session::employee("sam")  role = Employee  → sell, search, stock, best-sellers
//! Session::admin("ada")     role = Admin     → everything, incl. revenue/history
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};

/// Operator role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Employee => write!(f, "employee"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "employee" => Ok(Role::Employee),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::InvalidFormat {
                field: "role".to_string(),
                reason: format!("unknown role '{}', expected admin or employee", other),
            }),
        }
    }
}

/// Access level an operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Any logged-in role.
    Authenticated,
    /// Admin role only.
    Admin,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Authenticated => write!(f, "authenticated"),
            Access::Admin => write!(f, "admin"),
        }
    }
}

/// An operator session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub operator: Option<String>,
    pub role: Option<Role>,
}

impl Session {
    /// No one is logged in.
    pub fn anonymous() -> Self {
        Session::default()
    }

    pub fn new(operator: impl Into<String>, role: Role) -> Self {
        Session {
            operator: Some(operator.into()),
            role: Some(role),
        }
    }

    pub fn employee(operator: impl Into<String>) -> Self {
        Session::new(operator, Role::Employee)
    }

    pub fn admin(operator: impl Into<String>) -> Self {
        Session::new(operator, Role::Admin)
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// Returns `AuthorizationDenied` unless the session satisfies `access`.
    pub fn authorize(&self, access: Access) -> CoreResult<()> {
        let allowed = match access {
            Access::Authenticated => self.is_authenticated(),
            Access::Admin => self.is_admin(),
        };

        if allowed {
            Ok(())
        } else {
            Err(CoreError::AuthorizationDenied { required: access })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_matrix() {
        let anon = Session::anonymous();
        let employee = Session::employee("sam");
        let admin = Session::admin("ada");

        assert!(anon.authorize(Access::Authenticated).is_err());
        assert!(anon.authorize(Access::Admin).is_err());

        assert!(employee.authorize(Access::Authenticated).is_ok());
        assert_eq!(
            employee.authorize(Access::Admin),
            Err(CoreError::AuthorizationDenied {
                required: Access::Admin
            })
        );

        assert!(admin.authorize(Access::Authenticated).is_ok());
        assert!(admin.authorize(Access::Admin).is_ok());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Employee ".parse::<Role>().unwrap(), Role::Employee);
        assert!("manager".parse::<Role>().is_err());
    }
}
