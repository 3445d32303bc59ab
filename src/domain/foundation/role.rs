//! Principal roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The single authoritative role of an account. Fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Administrator scoped to one college.
    CollegeAdmin,
    /// College placement staff.
    Staff,
    /// Student with a premium-eligible subscriber record.
    Subscriber,
}

impl Role {
    /// Returns true for roles allowed to manage other accounts.
    pub fn is_administrative(&self) -> bool {
        matches!(self, Role::Admin | Role::CollegeAdmin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::CollegeAdmin => "COLLEGE_ADMIN",
            Role::Staff => "STAFF",
            Role::Subscriber => "SUBSCRIBER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "COLLEGE_ADMIN" => Ok(Role::CollegeAdmin),
            "STAFF" => Ok(Role::Staff),
            "SUBSCRIBER" => Ok(Role::Subscriber),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&Role::CollegeAdmin).unwrap();
        assert_eq!(json, "\"COLLEGE_ADMIN\"");
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("subscriber".parse::<Role>(), Ok(Role::Subscriber));
        assert_eq!("College_Admin".parse::<Role>(), Ok(Role::CollegeAdmin));
        assert!("STUDENTISH".parse::<Role>().is_err());
    }

    #[test]
    fn only_admins_are_administrative() {
        assert!(Role::Admin.is_administrative());
        assert!(Role::CollegeAdmin.is_administrative());
        assert!(!Role::Staff.is_administrative());
        assert!(!Role::Subscriber.is_administrative());
    }
}
