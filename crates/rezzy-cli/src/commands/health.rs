use anyhow::{Context, Result};

use super::AppContext;

pub async fn check(ctx: &AppContext) -> Result<()> {
    let health = ctx
        .backend
        .health_check()
        .await
        .with_context(|| format!("Rezzy API at {} is unreachable", ctx.config.api_base_url))?;
    println!("{} ({})", health.status, health.timestamp);
    Ok(())
}
