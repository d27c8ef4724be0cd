//! Route authorization table.
//!
//! Two independent lookups back the request gate:
//! - an exact-path exemption set for routes that need no credentials;
//! - an ordered list of `(prefix, roles)` rules. The longest matching prefix wins,
//!   so matching never depends on insertion order.

use std::collections::HashSet;
use std::str::FromStr;

use crate::constants::paths;
use crate::error::AuthError;

use super::role::{Role, RoleSet};

/// What to do with an authenticated request whose path matches no rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedRoutePolicy {
    /// Reject with 403 (default)
    #[default]
    Deny,
    /// Let any authenticated caller through
    Allow,
}

impl FromStr for UnmatchedRoutePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deny" => Ok(Self::Deny),
            "allow" => Ok(Self::Allow),
            other => Err(format!("unknown unmatched route policy: {}", other)),
        }
    }
}

/// Roles permitted on every path starting with `prefix`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub prefix: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    exempt: HashSet<String>,
    rules: Vec<RouteRule>,
    unmatched: UnmatchedRoutePolicy,
}

impl RouteTable {
    pub fn new(unmatched: UnmatchedRoutePolicy) -> Self {
        Self {
            exempt: HashSet::new(),
            rules: Vec::new(),
            unmatched,
        }
    }

    /// The platform's route table
    pub fn standard(unmatched: UnmatchedRoutePolicy) -> Self {
        use Role::{SuperAdmin, User};

        Self::new(unmatched)
            .exempt(paths::CREATE)
            .exempt(paths::REFRESH)
            .exempt(paths::HEALTH)
            .exempt(paths::PROBLEMS_GET)
            .exempt(paths::CONTESTS_LEADERBOARD)
            .exempt(paths::CONTESTS_GET)
            .rule(paths::USERS_GET, &[User, SuperAdmin])
            .rule(paths::USERS_UPDATE, &[User, SuperAdmin])
            .rule(paths::PROBLEMS_UPLOAD, &[User, SuperAdmin])
            .rule(paths::PROBLEMS_NOT_VISIBLE, &[User, SuperAdmin])
            .rule(paths::PROBLEMS_UPDATE, &[User, SuperAdmin])
            .rule(paths::CONTESTS_CREATE, &[User, SuperAdmin])
            .rule(paths::CONTESTS_REGISTER, &[User])
            .rule(paths::CONTESTS_REGISTRATIONS, &[User, SuperAdmin])
            .rule(paths::CONTESTS_CHECK_REGISTRATION, &[User])
    }

    pub fn exempt(mut self, path: &str) -> Self {
        self.exempt.insert(path.to_string());
        self
    }

    pub fn rule(mut self, prefix: &str, roles: &[Role]) -> Self {
        self.rules.push(RouteRule {
            prefix: prefix.to_string(),
            roles: roles.to_vec(),
        });
        // Stable: equal-length prefixes keep declaration order
        self.rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        self
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt.contains(path)
    }

    /// Permitted roles of the most specific rule matching `path`
    pub fn roles_for(&self, path: &str) -> Option<&[Role]> {
        self.rules
            .iter()
            .find(|rule| path.starts_with(&rule.prefix))
            .map(|rule| rule.roles.as_slice())
    }

    /// Coarse role check for an authenticated caller
    pub fn authorize(&self, path: &str, held: &RoleSet) -> Result<(), AuthError> {
        let allowed = match self.roles_for(path) {
            Some(permitted) => held.intersects(permitted),
            None => self.unmatched == UnmatchedRoutePolicy::Allow && !held.is_empty(),
        };

        if allowed {
            Ok(())
        } else {
            Err(AuthError::RoleForbidden(path.to_string()))
        }
    }

    #[cfg(test)]
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }
}
