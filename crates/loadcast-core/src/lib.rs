//! Shared foundations for the loadcast pipeline crates.
//!
//! `loadcast-core` holds what every other crate needs: the unified error
//! taxonomy ([`LoadcastError`]) and the epoch-second time helpers that fix the
//! pipeline's calendar conventions in one place.

pub mod error;
pub mod time;

pub use error::{LoadcastError, LoadcastResult};
