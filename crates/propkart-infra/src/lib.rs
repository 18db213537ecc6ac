//! Infrastructure layer for the PropKart client.
//!
//! Contains implementations of the traits defined in `propkart-core`: the
//! reqwest-based HTTP backend and the cookie-jar credential provider, plus
//! the TOML config loader.

pub mod config;
pub mod cookies;
pub mod http;
