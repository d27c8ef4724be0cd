//! Access tiers

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::roles;

/// Access tier of a caller.
///
/// Roles are not hierarchical: `SuperAdmin` is only permitted on a route when the
/// route lists it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => roles::USER,
            Role::SuperAdmin => roles::SUPERADMIN,
        }
    }

    pub fn is_superadmin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            roles::USER => Ok(Role::User),
            roles::SUPERADMIN => Ok(Role::SuperAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Roles carried by a role claim.
///
/// A claim may be a single identifier (`"user"`) or a comma separated composite
/// (`"user,superadmin"`). Unknown identifiers are dropped. Membership is exact, so
/// `"poweruser"` does not grant `user`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn parse(claim: &str) -> Self {
        Self(
            claim
                .split(',')
                .filter_map(|part| part.trim().parse().ok())
                .collect(),
        )
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// True when any held role appears in `permitted`
    pub fn intersects(&self, permitted: &[Role]) -> bool {
        permitted.iter().any(|role| self.contains(*role))
    }

    /// The role used for ownership decisions: superadmin wins over user
    pub fn effective(&self) -> Option<Role> {
        self.0.iter().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        Self(BTreeSet::from([role]))
    }
}
