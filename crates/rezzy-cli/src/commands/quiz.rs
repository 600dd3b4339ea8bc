use std::io::Write;

use anyhow::{Context, Result};
use rezzy_application::QuizUseCase;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::AppContext;
use crate::render;

pub async fn run(ctx: &AppContext, query: &str) -> Result<()> {
    let mut quiz = QuizUseCase::new(ctx.backend.clone());
    let total = quiz
        .start(query)
        .await
        .with_context(|| format!("No quiz available for \"{query}\""))?
        .questions
        .len();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some((index, question)) = quiz.current_question() {
        println!();
        println!("Question {} of {total}", index + 1);
        render::print_question(question);
        print!("Your answer: ");
        std::io::stdout().flush()?;

        let Some(input) = lines.next_line().await? else {
            break;
        };
        let feedback = quiz.answer(&input)?;
        match (feedback.correct, feedback.correct_option) {
            (true, _) => println!("Correct!"),
            (false, Some(correct)) => println!("Incorrect. The answer is: {correct}"),
            (false, None) => println!("Recorded."),
        }
    }

    let score = quiz.finish()?;
    println!();
    println!("Score: {score}%");
    Ok(())
}
