//! Presentation logic and port traits for the PropKart client.
//!
//! This crate defines the "ports" (backend and credential traits) that the
//! infrastructure layer implements, plus the two page components built on
//! them: the chat widget and the page enhancer. Components never touch a
//! live document; each owns its state and renders an isolated [`render::Node`]
//! tree. It depends only on `propkart-types` -- never on `propkart-infra` or
//! any HTTP crate.

pub mod backend;
pub mod credentials;
pub mod enhancer;
pub mod render;
pub mod sequence;
pub mod widget;

#[cfg(test)]
pub(crate) mod testing;
