//! Axum HTTP layer for the FinPort backend.
//!
//! Routes are thin: they parse and validate the wire format, hand off to the
//! use cases in `finport_application`, and map flow errors onto the API error
//! taxonomy. All shared dependencies travel through [`AppState`].

pub mod extract;
pub mod routes;
pub mod state;

pub use extract::AuthenticatedUser;
pub use state::AppState;
