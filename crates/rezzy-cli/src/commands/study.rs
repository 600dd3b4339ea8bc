use anyhow::Result;
use rezzy_application::{StudyMaterialService, StudyMaterials};

use super::AppContext;
use crate::render;

pub async fn search(ctx: &AppContext, query: &str) -> Result<()> {
    let study = StudyMaterialService::new(ctx.backend.clone());
    let StudyMaterials {
        questions,
        flashcards,
    } = study.search(query).await?;

    if questions.is_empty() && flashcards.is_empty() {
        println!("Nothing found for \"{query}\".");
        return Ok(());
    }
    if !questions.is_empty() {
        render::print_questions(&questions);
    }
    if !flashcards.is_empty() {
        render::print_flashcards(&flashcards);
    }
    Ok(())
}
