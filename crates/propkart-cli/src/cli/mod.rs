//! CLI command definitions for the `propkart` binary.
//!
//! Uses clap derive macros for argument parsing. Each subcommand drives one
//! page component against a live PropKart server.

pub mod chat;
pub mod history;
pub mod suggest;
pub mod views;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use propkart_types::chat::PropertyId;

/// Talk to the PropKart property assistant from your terminal.
#[derive(Parser)]
#[command(name = "propkart", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config.toml (defaults to the platform config dir).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Server origin, overriding the config file and PROPKART_BASE_URL.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Use a fixed anti-forgery token instead of the server's cookie.
    #[arg(long, global = true, env = "PROPKART_CSRF_TOKEN", hide_env_values = true)]
    pub csrf_token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the chat assistant in an interactive session.
    Chat {
        /// Page the widget is mounted on; seller pages have no assistant.
        #[arg(long, default_value = "/")]
        page_path: String,
    },

    /// Print the stored conversation for this client's session.
    History,

    /// Show the view count of a property listing.
    Views {
        /// Property id.
        property_id: PropertyId,
    },

    /// Show search suggestions for a partial query.
    Suggest {
        /// Text typed into the search box.
        query: String,
    },
}
