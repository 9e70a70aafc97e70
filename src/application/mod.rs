//! Application services (use cases).
//!
//! These services implement the decision-engine side of a session and the
//! shared runtime state read by the control plane.

pub mod robot;
pub mod state;
