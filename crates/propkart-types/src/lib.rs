//! Shared types for the PropKart client.
//!
//! This crate contains the chat domain types (messages, session and property
//! ids), the JSON wire shapes of the chat and listing endpoints, the client
//! configuration, and the error enums shared by every other crate.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
