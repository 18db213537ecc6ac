//! Main chat loop orchestration.
//!
//! Loads the page (so the server can set its cookies), mounts the widget,
//! opens it from the launcher, then feeds stdin lines through the widget
//! until `/quit` or end of input.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use propkart_core::widget::{
    ChatWidget, ClearOutcome, KeyPress, Presentation, SendOutcome, WidgetAction,
};
use propkart_types::chat::MessageRole;

use crate::state::{AppState, ConcreteChatWidget};

use super::banner::{print_presentation, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::renderer::TranscriptPrinter;

pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run the interactive chat loop on `page_path`.
pub async fn run_chat_loop(state: &AppState, page_path: &str) -> anyhow::Result<()> {
    if let Err(e) = state.backend.load_page(page_path).await {
        warn!(error = %e, page_path, "Page load failed, continuing without server cookies");
    }

    let widget = ChatWidget::mount(
        state.backend.clone(),
        Arc::clone(&state.credentials),
        state.config.widget.clone(),
        &state.config.seller_path_prefix,
        page_path,
    )
    .await;
    let Some(widget) = widget else {
        println!(
            "  {} The assistant is not available on {}",
            style("!").yellow().bold(),
            style(page_path).cyan()
        );
        return Ok(());
    };

    widget.dispatch(WidgetAction::LauncherClick);

    let printer = TranscriptPrinter::new(
        state.backend.base_url(),
        &state.config.widget.property_url_prefix,
    );
    print_welcome_banner(&state.config.widget.title, state.backend.base_url(), page_path);
    printer.print_all(&widget.transcript());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt(widget.presentation())?;
        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            println!();
            break;
        };

        if let Some(command) = commands::parse(&line) {
            match command {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Quit => break,
                ChatCommand::Open => print_presentation(widget.open()),
                ChatCommand::Close => print_presentation(widget.close()),
                ChatCommand::Minimize => print_presentation(widget.toggle_minimize()),
                ChatCommand::Html => println!("{}\n", widget.render().to_html()),
                ChatCommand::Clear => clear(&widget, &printer).await,
                ChatCommand::Unknown(cmd) => {
                    println!(
                        "  {} Unknown command {}. Type /help for commands.",
                        style("?").yellow().bold(),
                        style(cmd).cyan()
                    );
                }
            }
            continue;
        }

        send(&widget, &printer, &line).await;
    }

    println!("  {}", style("Goodbye!").dim());
    Ok(())
}

fn print_prompt(presentation: Presentation) -> anyhow::Result<()> {
    match presentation {
        Presentation::Open => print!("{} ", style("you ›").green().bold()),
        other => print!("{} ", style(format!("you ({other}) ›")).green().dim()),
    }
    std::io::stdout().flush().context("failed to flush stdout")
}

async fn send(widget: &ConcreteChatWidget, printer: &TranscriptPrinter, line: &str) {
    let before = widget.transcript().len();
    widget.input(line, None);

    let spinner = spinner("thinking...");
    let outcome = widget.key_down(KeyPress::enter()).await;
    spinner.finish_and_clear();
    debug!(?outcome, "Message handled");

    match outcome {
        Some(SendOutcome::Empty) | None => {}
        Some(SendOutcome::Busy) => {
            println!("  {}", style("Still waiting for the previous reply.").dim());
        }
        Some(_) => {
            let transcript = widget.transcript();
            let replies = transcript
                .iter()
                .skip(before)
                .filter(|m| m.role == MessageRole::Assistant);
            for msg in replies {
                printer.print(msg);
            }
        }
    }
}

async fn clear(widget: &ConcreteChatWidget, printer: &TranscriptPrinter) {
    let spinner = spinner("clearing...");
    let outcome = widget.clear().await;
    spinner.finish_and_clear();

    match outcome {
        ClearOutcome::Cleared => printer.print_all(&widget.transcript()),
        ClearOutcome::Rejected(_) | ClearOutcome::Unreachable => {
            if let Some(last) = widget.transcript().last() {
                printer.print(last);
            }
        }
        ClearOutcome::Busy | ClearOutcome::Stale => {}
    }
}
