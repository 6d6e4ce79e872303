//! # Privilege Policy
//!
//! Maps function groups to the minimum privilege they require and compares
//! a caller's level against it. Pure lookups, no I/O.
//!
//! Levels are totally ordered: `Admin > Manager > Delegate`.

use super::errors::ChaincodeError;
use serde::{Deserialize, Serialize};
use shared_types::functions::{
    ADMIN_FUNCS, FUNC_PREFIX_LEN, MANAGE_FUNCS, QUERY_FUNCS, USER_FUNCS,
};
use std::fmt;

/// Privilege held by a caller. Variant order is the dominance order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrivilegeLevel {
    /// Ordinary account holder acting for itself.
    Delegate,
    /// Operator allowed to manage supply and users.
    Manager,
    /// Deployment administrator.
    Admin,
}

/// The closed set of function groups, decoded from a 4-byte name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionGroup {
    /// `ADMN`
    Admin,
    /// `MANG`
    Manage,
    /// `USER`
    User,
    /// `QURY`
    Query,
}

impl FunctionGroup {
    /// Every group, in declaration order.
    pub const ALL: [Self; 4] = [Self::Admin, Self::Manage, Self::User, Self::Query];

    /// The 4-byte wire prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Admin => ADMIN_FUNCS,
            Self::Manage => MANAGE_FUNCS,
            Self::User => USER_FUNCS,
            Self::Query => QUERY_FUNCS,
        }
    }

    /// Decode an exact prefix.
    pub fn from_prefix(prefix: &str) -> Result<Self, ChaincodeError> {
        Self::ALL
            .into_iter()
            .find(|group| group.prefix() == prefix)
            .ok_or_else(|| ChaincodeError::UnknownGroup(prefix.to_string()))
    }

    /// Decode the group of a full function name.
    ///
    /// Names shorter than the prefix fail with `FunctionNameTooShort`
    /// instead of slicing out of bounds.
    pub fn parse(function: &str) -> Result<Self, ChaincodeError> {
        if function.len() < FUNC_PREFIX_LEN {
            return Err(ChaincodeError::FunctionNameTooShort {
                name: function.to_string(),
                min: FUNC_PREFIX_LEN,
            });
        }
        // Non-ASCII names may not split on a char boundary.
        let prefix = function
            .get(..FUNC_PREFIX_LEN)
            .ok_or_else(|| ChaincodeError::UnknownGroup(function.to_string()))?;
        Self::from_prefix(prefix)
    }

    /// Minimum privilege needed to invoke functions of this group.
    pub fn required_privilege(self) -> PrivilegeLevel {
        match self {
            Self::Admin => PrivilegeLevel::Admin,
            Self::Manage => PrivilegeLevel::Manager,
            Self::User | Self::Query => PrivilegeLevel::Delegate,
        }
    }
}

impl fmt::Display for FunctionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Minimum privilege for a group.
pub fn required_privilege(group: FunctionGroup) -> PrivilegeLevel {
    group.required_privilege()
}

/// Minimum privilege for a raw 4-byte prefix; unknown prefixes fail with
/// `UnknownGroup`.
pub fn required_privilege_for(prefix: &str) -> Result<PrivilegeLevel, ChaincodeError> {
    FunctionGroup::from_prefix(prefix).map(FunctionGroup::required_privilege)
}

/// True iff `caller` dominates `required`.
pub fn verify(caller: PrivilegeLevel, required: PrivilegeLevel) -> bool {
    caller >= required
}
