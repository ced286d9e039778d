//! Access domain
//!
//! Decides whether a request may run an action: HTML reads are public,
//! XML and Atom need a session or a usable API key, mutations always need a
//! session, and admin-only mutations need an administrator's session.

mod context;
mod decision;

pub use context::{ActionKind, RequestContext, ResponseFormat};
pub use decision::{
    evaluate_admin, evaluate_key, requirement, AccessDecision, AccessGrant, DenialReason, Requirement,
};
