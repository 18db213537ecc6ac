//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and stand in for the widget's header controls.

use console::style;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the conversation on the server.
    Clear,
    /// Open the chat panel.
    Open,
    /// Hide the chat panel; the conversation is kept.
    Close,
    /// Toggle the minimized state.
    Minimize,
    /// Dump the widget's rendered markup.
    Html,
    /// Exit the chat session.
    Quit,
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" => Some(ChatCommand::Clear),
        "/open" => Some(ChatCommand::Open),
        "/close" => Some(ChatCommand::Close),
        "/minimize" | "/min" => Some(ChatCommand::Minimize),
        "/html" => Some(ChatCommand::Html),
        "/quit" | "/exit" | "/q" => Some(ChatCommand::Quit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}     Show this help message", style("/help").cyan());
    println!("  {}    Start a new conversation", style("/clear").cyan());
    println!("  {}     Open the chat panel", style("/open").cyan());
    println!("  {}    Hide the chat panel", style("/close").cyan());
    println!("  {} Minimize or restore the panel", style("/minimize").cyan());
    println!("  {}     Print the widget markup", style("/html").cyan());
    println!("  {}     End the chat session", style("/quit").cyan());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit() {
        assert_eq!(parse("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse("/q"), Some(ChatCommand::Quit));
    }

    #[test]
    fn test_parse_panel_controls() {
        assert_eq!(parse("/open"), Some(ChatCommand::Open));
        assert_eq!(parse("/close"), Some(ChatCommand::Close));
        assert_eq!(parse("/minimize"), Some(ChatCommand::Minimize));
        assert_eq!(parse("/min"), Some(ChatCommand::Minimize));
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(parse("  /CLEAR  "), Some(ChatCommand::Clear));
        assert_eq!(parse("/Html please"), Some(ChatCommand::Html));
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse("show me flats in Pune"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("/wishlist"),
            Some(ChatCommand::Unknown("/wishlist".to_string()))
        );
    }
}
