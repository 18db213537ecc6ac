//! Interactive terminal chat with the PropKart assistant.
//!
//! Drives a mounted [`ChatWidget`](propkart_core::widget::ChatWidget): each
//! line typed goes through the widget's composer, slash commands map onto
//! header controls. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod loop_runner;
pub mod renderer;
