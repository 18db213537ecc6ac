//! `propkart views <id>`: open a listing's detail view and report its count.

use console::style;

use propkart_core::enhancer::ViewsOutcome;
use propkart_types::chat::PropertyId;

use crate::state::AppState;

use super::chat::loop_runner::spinner;

pub async fn show_views(state: &AppState, property_id: PropertyId, json: bool) -> anyhow::Result<()> {
    let enhancer = state.enhancer();
    let counter = enhancer.views();
    counter.register_slot(property_id);

    let spinner = spinner("Fetching views...");
    let outcome = counter.open_detail(property_id).await;
    spinner.finish_and_clear();

    let ViewsOutcome::Updated(views) = outcome else {
        anyhow::bail!("could not fetch views for property #{property_id}");
    };

    if json {
        let body = serde_json::json!({
            "property_id": property_id,
            "views": views,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Property #{} has {} views",
        style("👁").bold(),
        style(property_id).cyan(),
        style(views).bold()
    );
    println!();
    Ok(())
}
