//! Plain-text rendering of chat messages for the terminal.

use rezzy_core::chat::{ChatMessage, Flashcard, Question};
use rezzy_core::session::{ChatSessionSummary, SearchSuggestion, parse_timestamp};
use rezzy_core::util::{format_date, truncate_text};

const OPTION_LABELS: &[char] = &['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

pub fn speaker(message: &ChatMessage) -> &'static str {
    if message.is_user() { "You" } else { "Rezzy" }
}

pub fn print_message(message: &ChatMessage) {
    println!("{}: {}", speaker(message), message.text);
    print_attachments(message);
}

/// Questions and flashcards attached to a bot message.
pub fn print_attachments(message: &ChatMessage) {
    if let Some(questions) = &message.questions {
        print_questions(questions);
    }
    if let Some(flashcards) = &message.flashcards {
        print_flashcards(flashcards);
    }
}

pub fn print_questions(questions: &[Question]) {
    println!();
    println!("  Questions:");
    for (index, question) in questions.iter().enumerate() {
        println!(
            "  {}. {}{}",
            index + 1,
            label(question.subject.as_deref(), question.topic.as_deref()),
            question.question.as_deref().unwrap_or_default()
        );
        print_options(question);
        if let Some(answer) = question.correct_option_text() {
            println!("       Answer: {answer}");
        }
    }
}

/// A quiz question without its answer.
pub fn print_question(question: &Question) {
    println!(
        "{}{}",
        label(question.subject.as_deref(), question.topic.as_deref()),
        question.question.as_deref().unwrap_or_default()
    );
    print_options(question);
}

fn print_options(question: &Question) {
    for (option, text) in OPTION_LABELS
        .iter()
        .zip(question.options.iter().flatten())
    {
        println!("       {option}) {text}");
    }
}

pub fn print_flashcards(flashcards: &[Flashcard]) {
    println!();
    println!("  Flashcards:");
    for flashcard in flashcards {
        println!(
            "  - {}{}",
            label(flashcard.subject.as_deref(), flashcard.topic.as_deref()),
            flashcard.front.as_deref().unwrap_or_default()
        );
        println!("    {}", flashcard.back.as_deref().unwrap_or_default());
    }
}

pub fn print_session_row(session: &ChatSessionSummary) {
    let updated = if session.updated_at.is_empty() {
        "-".to_string()
    } else {
        parse_timestamp(&session.updated_at)
            .map(|at| format_date(&at))
            .unwrap_or_else(|_| session.updated_at.clone())
    };
    println!(
        "{}  {:<48}  {:>3} responses  {}",
        session.chat_session_id,
        truncate_text(&session.title, 48),
        session.response_count,
        updated
    );
}

pub fn print_suggestion(suggestion: &SearchSuggestion) {
    println!("  [{:?}] {}", suggestion.category, suggestion.text);
}

fn label(subject: Option<&str>, topic: Option<&str>) -> String {
    match (subject, topic) {
        (Some(subject), Some(topic)) => format!("[{subject} / {topic}] "),
        (Some(one), None) | (None, Some(one)) => format!("[{one}] "),
        (None, None) => String::new(),
    }
}
