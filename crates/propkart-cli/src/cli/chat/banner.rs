//! Welcome banner display for chat sessions.

use console::style;

use propkart_core::widget::Presentation;

/// Print the banner at the start of a chat session.
pub fn print_welcome_banner(title: &str, base_url: &str, page_path: &str) {
    println!();
    println!("  {}", style(title).cyan().bold());
    println!();
    println!("  {}  {}", style("Server:").bold(), style(base_url).dim());
    println!("  {}    {}", style("Page:").bold(), style(page_path).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// Print the panel state after a header control.
pub fn print_presentation(presentation: Presentation) {
    let label = match presentation {
        Presentation::Open => style("open").green(),
        Presentation::Minimized => style("minimized").yellow(),
        Presentation::Hidden => style("hidden").dim(),
    };
    println!("  {} Chat panel is {label}", style("*").cyan());
}
