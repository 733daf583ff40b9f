//! Authentication core of the amigos backend.
//!
//! Two stateless components: a fail-closed credential verifier over stored
//! password hashes, and a JWT token service issuing and validating access
//! and refresh tokens. The HTTP layer and the user store are collaborators
//! that call into this crate; nothing here performs I/O.

pub mod auth;
pub mod configuration;
pub mod error;
pub mod telemetry;
