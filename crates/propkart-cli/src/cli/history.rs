//! `propkart history`: load the stored conversation the way the widget does
//! on mount and print it.

use console::style;

use propkart_core::widget::HistoryOutcome;

use crate::state::AppState;

use super::chat::renderer::TranscriptPrinter;

pub async fn show_history(state: &AppState, json: bool) -> anyhow::Result<()> {
    let widget = state.widget();
    let outcome = widget.load_history().await;

    if outcome == HistoryOutcome::Failed {
        anyhow::bail!("could not load chat history from {}", state.backend.base_url());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&widget.transcript())?);
        return Ok(());
    }

    if !matches!(outcome, HistoryOutcome::Restored(_)) {
        println!("  {}", style("No stored conversation").dim());
        return Ok(());
    }

    let printer = TranscriptPrinter::new(
        state.backend.base_url(),
        &state.config.widget.property_url_prefix,
    );
    println!();
    printer.print_all(&widget.transcript());
    Ok(())
}
