use std::io::Write;

use anyhow::Result;
use futures::StreamExt;
use rezzy_application::StudyMaterialService;

use super::AppContext;
use crate::render;

pub async fn ask(ctx: &AppContext, message: &str, stream: bool) -> Result<()> {
    let chat = ctx.chat().await?;
    let reply = match chat.send_message(message).await {
        Ok(reply) => reply,
        Err(err) => {
            // A failed request leaves the substituted bot reply at the end.
            if let Some(reply) = chat.last_message().await.filter(|m| m.is_bot()) {
                render::print_message(&reply);
            }
            return Err(err.into());
        }
    };

    if stream {
        let mut stdout = std::io::stdout();
        let mut printed = 0;
        write!(stdout, "{}: ", render::speaker(&reply))?;

        let mut frames = Box::pin(chat.reveal(&reply));
        while let Some(frame) = frames.next().await {
            write!(stdout, "{}", &frame[printed..])?;
            stdout.flush()?;
            printed = frame.len();
        }
        writeln!(stdout)?;
        render::print_attachments(&reply);
    } else {
        render::print_message(&reply);
    }

    if let Some(session_id) = chat.active_session_id().await {
        tracing::info!(%session_id, "Answer filed under session");
    }
    Ok(())
}

pub async fn new_chat(ctx: &AppContext) -> Result<()> {
    let chat = ctx.chat().await?;
    chat.clear_chat().await?;
    println!("Started a new chat.");
    Ok(())
}

pub async fn suggestions(ctx: &AppContext) -> Result<()> {
    let study = StudyMaterialService::new(ctx.backend.clone());
    println!("Try asking:");
    for suggestion in study.search_suggestions() {
        render::print_suggestion(&suggestion);
    }

    let chat = ctx.chat().await?;
    match chat.popular_sessions().await {
        Ok(popular) if !popular.is_empty() => {
            println!();
            println!("Popular sessions:");
            for suggestion in &popular {
                println!("  {}  {}", suggestion.id, suggestion.text);
            }
        }
        Ok(_) => {}
        Err(err) => tracing::warn!(error = %err, "Failed to load popular sessions"),
    }
    Ok(())
}
