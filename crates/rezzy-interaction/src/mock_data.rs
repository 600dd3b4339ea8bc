//! Built-in study material used when the backend is unavailable.

use rand::seq::SliceRandom;
use rezzy_core::chat::{Flashcard, Question, ResponseItem};
use rezzy_core::session::{SearchSuggestion, SuggestionCategory};

// (subject, topic, question, options, correct option)
const QUESTIONS: &[(&str, &str, &str, &[&str], &str)] = &[
    (
        "Anatomy",
        "Skeletal System",
        "A student hears a click in the jaw while yawning. Which muscle is attached to the articular disc of the temporomandibular joint?",
        &["Medial pterygoid", "Temporalis", "Masseter", "Lateral pterygoid"],
        "Lateral pterygoid",
    ),
    (
        "Osteology",
        "Bone Formation",
        "What is the primary function of the patella?",
        &["Knee protection", "Muscle attachment", "Joint stability", "All of the above"],
        "All of the above",
    ),
    (
        "Anatomy",
        "Bone Density",
        "How does osteoporosis affect bone density?",
        &["Increases density", "Decreases density", "No effect", "Varies by location"],
        "Decreases density",
    ),
    (
        "NEET-PG",
        "Osteology",
        "Which test best serves the purpose of diagnosing osteoporosis?",
        &["X-ray", "DEXA scan", "MRI", "CT scan"],
        "DEXA scan",
    ),
    (
        "Anatomy",
        "Joint Structure",
        "What type of joint is the temporomandibular joint?",
        &["Hinge joint", "Ball and socket", "Condylar joint", "Pivot joint"],
        "Condylar joint",
    ),
    (
        "Anatomy",
        "Lower Limb",
        "Which bone articulates with the femur at the knee joint?",
        &["Fibula", "Tibia", "Talus", "Calcaneus"],
        "Tibia",
    ),
    (
        "Anatomy",
        "Pelvic Girdle",
        "Which bone is NOT part of the hip bone?",
        &["Ilium", "Ischium", "Pubis", "Sacrum"],
        "Sacrum",
    ),
    (
        "Physiology",
        "Muscle Contraction",
        "Calcium initiates skeletal muscle contraction by binding to which protein?",
        &["Actin", "Myosin", "Troponin", "Tropomyosin"],
        "Troponin",
    ),
];

// (subject, topic, front, back)
const FLASHCARDS: &[(&str, &str, &str, &str)] = &[
    (
        "Osteology",
        "Bone Density",
        "How does osteoporosis affect bone density?",
        "Osteoporosis decreases bone mineral density, making bones fragile and prone to fractures. It primarily affects trabecular bone.",
    ),
    (
        "NEET-PG",
        "Anatomy",
        "What topic is important to study for NEET-PG in Osteology?",
        "Bone formation, bone remodeling, fracture healing, metabolic bone diseases and joint anatomy are high-yield NEET-PG topics.",
    ),
    (
        "Anatomy",
        "Lower Limb",
        "Which bones articulate with the femur?",
        "The femur articulates with the hip bone at the acetabulum, the tibia at the knee, and the patella anteriorly.",
    ),
    (
        "Anatomy",
        "Pelvic Girdle",
        "Which bones form the pelvic girdle?",
        "The two hip bones (each formed by the ilium, ischium and pubis) together with the sacrum.",
    ),
    (
        "Orthopedics",
        "Fractures",
        "What are the major types of bone fractures?",
        "Simple (closed), compound (open), greenstick and comminuted fractures.",
    ),
    (
        "Histology",
        "Bone Cells",
        "Osteoblasts vs osteoclasts?",
        "Osteoblasts build new bone matrix; osteoclasts resorb bone. Their balance drives remodeling.",
    ),
    (
        "Physiology",
        "Muscle Contraction",
        "What role does calcium play in muscle contraction?",
        "Calcium binds to troponin, shifting tropomyosin to expose myosin-binding sites on actin and allowing cross-bridge formation.",
    ),
];

// (id, text, category)
const SUGGESTIONS: &[(&str, &str, SuggestionCategory)] = &[
    ("1", "What bone articulates with the femur?", SuggestionCategory::Topic),
    (
        "2",
        "What topic is important to study for NEET-PG in Osteology?",
        SuggestionCategory::Question,
    ),
    (
        "3",
        "Give me 5 flashcards around anatomy topic",
        SuggestionCategory::Flashcard,
    ),
];

pub fn questions() -> Vec<Question> {
    QUESTIONS
        .iter()
        .map(|(subject, topic, question, options, correct)| ResponseItem {
            question: Some(question.to_string()),
            options: Some(options.iter().map(|option| option.to_string()).collect()),
            correct_option: Some(correct.to_string()),
            subject: Some(subject.to_string()),
            topic: Some(topic.to_string()),
            ..Default::default()
        })
        .collect()
}

pub fn flashcards() -> Vec<Flashcard> {
    FLASHCARDS
        .iter()
        .map(|(subject, topic, front, back)| ResponseItem {
            front: Some(front.to_string()),
            back: Some(back.to_string()),
            subject: Some(subject.to_string()),
            topic: Some(topic.to_string()),
            ..Default::default()
        })
        .collect()
}

/// The three starter prompts shown on an empty chat.
pub fn search_suggestions() -> Vec<SearchSuggestion> {
    SUGGESTIONS
        .iter()
        .map(|(id, text, category)| SearchSuggestion::new(*id, *text, *category))
        .collect()
}

/// Up to `count` questions in random order.
pub fn random_questions(count: usize) -> Vec<Question> {
    sample(questions(), count)
}

/// Up to `count` flashcards in random order.
pub fn random_flashcards(count: usize) -> Vec<Flashcard> {
    sample(flashcards(), count)
}

fn sample(items: Vec<ResponseItem>, count: usize) -> Vec<ResponseItem> {
    items
        .choose_multiple(&mut rand::thread_rng(), count)
        .cloned()
        .collect()
}

/// Fixture items related to `query`.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub flashcards: Vec<Flashcard>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty() && self.flashcards.is_empty()
    }
}

/// Case-insensitive match of `query` against the fixture text fields.
///
/// An item matches when the query contains one of its subject/topic names,
/// or when its question/front/back text contains the query.
pub fn search_content(query: &str) -> SearchResults {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return SearchResults::default();
    }

    let matches = |item: &ResponseItem| {
        let labels = [&item.subject, &item.topic];
        let texts = [&item.question, &item.front, &item.back];

        labels
            .iter()
            .filter_map(|field| field.as_deref())
            .any(|label| query.contains(&label.to_lowercase()))
            || texts
                .iter()
                .filter_map(|field| field.as_deref())
                .any(|text| text.to_lowercase().contains(&query))
    };

    SearchResults {
        questions: questions().into_iter().filter(|item| matches(item)).collect(),
        flashcards: flashcards().into_iter().filter(|item| matches(item)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_candidates() {
        assert!(questions().iter().all(ResponseItem::is_question_candidate));
        assert!(flashcards().iter().all(ResponseItem::is_flashcard_candidate));
    }

    #[test]
    fn test_random_sampling_respects_count() {
        assert_eq!(random_questions(3).len(), 3);
        assert_eq!(random_flashcards(100).len(), FLASHCARDS.len());
    }

    #[test]
    fn test_search_by_topic_label() {
        let results = search_content("Tell me about Osteology");
        assert!(!results.is_empty());
        for item in results.questions.iter().chain(results.flashcards.iter()) {
            assert!(
                item.subject.as_deref() == Some("Osteology")
                    || item.topic.as_deref() == Some("Osteology"),
                "unexpected match: {item:?}"
            );
        }
    }

    #[test]
    fn test_search_by_text() {
        let results = search_content("troponin");
        assert_eq!(results.questions.len(), 0);
        assert_eq!(results.flashcards.len(), 1);
    }

    #[test]
    fn test_search_without_match() {
        assert!(search_content("quantum chromodynamics").is_empty());
        assert!(search_content("   ").is_empty());
    }
}
