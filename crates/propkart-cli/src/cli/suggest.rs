//! `propkart suggest <query>`: type a query into the search box and print
//! the dropdown.

use anyhow::Context;
use console::style;

use crate::state::AppState;

use super::chat::loop_runner::spinner;

pub async fn suggest(state: &AppState, query: &str, json: bool) -> anyhow::Result<()> {
    let min_chars = state.config.search.min_query_chars;
    if query.trim().chars().count() < min_chars {
        if json {
            println!("[]");
        } else {
            println!(
                "  {} Type at least {min_chars} characters to get suggestions",
                style("!").yellow().bold()
            );
        }
        return Ok(());
    }

    let enhancer = state.enhancer();
    let search = enhancer.search();

    let spinner = spinner("Searching...");
    search
        .on_input(query)
        .await
        .context("suggestion lookup was interrupted")?;
    spinner.finish_and_clear();

    let suggestions = search.suggestions();
    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("  {}", style("No suggestions").dim());
        return Ok(());
    }
    println!();
    for suggestion in &suggestions {
        println!("  {} {suggestion}", style("›").cyan());
    }
    println!();
    Ok(())
}
