use anyhow::{Context, Result};

use crate::context::AppContext;
use crate::render;

/// Lists conversations, or the selectable replies of `id`.
pub async fn run(ctx: &AppContext, id: Option<&str>) -> Result<()> {
    let history = ctx.studio.history();
    match id {
        None => {
            let summaries = history
                .refresh()
                .await
                .context("Failed to load conversations")?;
            render::print_summaries(&summaries);
        }
        Some(id) => {
            let replies = history
                .replies(id)
                .await
                .with_context(|| format!("Failed to load conversation {}", id))?;
            render::print_replies(&replies);
        }
    }
    Ok(())
}
