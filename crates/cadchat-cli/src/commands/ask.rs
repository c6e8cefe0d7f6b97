use anyhow::{Result, bail};
use cadchat_core::session::{ModeSelection, Transition};

use crate::context::{AppContext, parse_mode};
use crate::render;

/// Submits one query in a fresh conversation and prints the outcome.
pub async fn run(ctx: &AppContext, text: &str, mode: Option<&str>) -> Result<()> {
    if let Some(mode) = mode {
        let mode = parse_mode(mode)?;
        if let ModeSelection::Locked(locked) = ctx.studio.select_mode(mode).await {
            bail!("Render mode is locked to {}", locked);
        }
    }

    let update = ctx.studio.submit_query(text).await?;
    render::print_update(&ctx.studio, &update).await;

    if let Transition::Failed { message } = &update.transition {
        bail!("Query failed: {}", message);
    }
    Ok(())
}
