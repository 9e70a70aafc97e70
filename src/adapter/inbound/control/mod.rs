//! Control-plane HTTP server.
//!
//! Exposes a single liveness route:
//!
//! - `GET /` and `HEAD /`: `200` with a JSON [`StatusSnapshot`]
//!
//! [`StatusSnapshot`]: crate::application::state::StatusSnapshot

mod handler;
mod server;

pub use handler::router;
pub use server::ControlPlaneServer;
