//! Platform role vocabulary
//!
//! Every authenticated user acts in exactly one role. The role determines
//! which onboarding flow applies and which route prefixes are accessible.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User role on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Retail investor buying fractional property units
    Investor,
    /// Property builder listing projects
    Builder,
    /// Platform administrator
    Admin,
}

impl Role {
    /// Returns true for roles that must complete KYC before using the platform
    pub fn requires_kyc(&self) -> bool {
        matches!(self, Role::Investor | Role::Builder)
    }

    /// Route prefix owned by this role
    pub fn route_prefix(&self) -> &'static str {
        match self {
            Role::Investor => "/investor",
            Role::Builder => "/builder",
            Role::Admin => "/admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Investor => "investor",
            Role::Builder => "builder",
            Role::Admin => "admin",
        };
        f.write_str(s)
    }
}

impl FromStr for Role {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "investor" => Ok(Role::Investor),
            "builder" => Ok(Role::Builder),
            "admin" => Ok(Role::Admin),
            other => Err(crate::CoreError::validation(format!(
                "Unknown role: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Investor, Role::Builder, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_admin_does_not_require_kyc() {
        assert!(Role::Investor.requires_kyc());
        assert!(Role::Builder.requires_kyc());
        assert!(!Role::Admin.requires_kyc());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Role::Builder).unwrap();
        assert_eq!(json, "\"builder\"");
    }
}
