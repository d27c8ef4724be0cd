//! Authentication and authorization core
//!
//! - [`token`]: session token codec
//! - [`verifier`]: external identity verification used at sign-in
//! - [`routes`]: route exemptions and role table
//! - [`context`]: per-route context enrichment
//! - [`gate`]: the orchestrator every request passes through

pub mod context;
pub mod gate;
pub mod role;
pub mod routes;
pub mod token;
pub mod verifier;

pub use context::{Caller, PathParams, RequestContext};
pub use gate::{Admission, Gate};
pub use role::{Role, RoleSet};
pub use routes::{RouteTable, UnmatchedRoutePolicy};
pub use token::{Claims, TokenCodec, TokenPair};
pub use verifier::IdentityVerifier;
