//! Application state
//!
//! The injected session and the per-screen fetch helpers.

pub mod fetch;
pub mod session;

pub use fetch::{use_fetch, use_lifetime};
pub use session::{provide_session, use_session};
