use anyhow::{Context, Result};

use super::AppContext;
use crate::render;

pub async fn list(ctx: &AppContext, page: u32, limit: u32) -> Result<()> {
    let result = ctx
        .backend
        .list_sessions(page, limit)
        .await
        .context("Failed to list chat sessions")?;

    if result.chat_sessions.is_empty() {
        println!("No chat sessions yet.");
        return Ok(());
    }

    for session in &result.chat_sessions {
        render::print_session_row(session);
    }
    let pagination = &result.pagination;
    println!();
    println!(
        "Page {} of {} ({} sessions)",
        pagination.current_page, pagination.total_pages, pagination.total_count
    );
    Ok(())
}

pub async fn show(ctx: &AppContext, session_id: &str) -> Result<()> {
    let chat = ctx.chat().await?;
    chat.open_session(session_id)
        .await
        .with_context(|| format!("Failed to open chat session {session_id}"))?;

    for message in chat.messages().await {
        render::print_message(&message);
        println!();
    }
    Ok(())
}
