//! API Client
//!
//! Browser implementation of the back-office API traits.

pub mod client;

pub use client::{get_api_base, set_api_base, GlooClient};
