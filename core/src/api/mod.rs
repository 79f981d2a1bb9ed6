//! Request/response surface the UI layer talks to.
//!
//! Versioned modules (currently `v1`) keep the wire shape stable while the
//! broker underneath evolves.

pub mod v1;
