//! services/assistant/tests/study_flow.rs
//!
//! End-to-end flows through the feature modules with a scripted gateway
//! standing in for the chat completion backend. Each test checks both the
//! final output and the exact calls that reached the model.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use assistant_lib::{chat, explainer, flashcards, quiz, summarizer};
use async_trait::async_trait;
use study_buddy_core::{
    score_quiz, ChatCompletionService, ChatMessage, ChatRole, CoreError, CoreResult,
    DifficultyLevel, QuizKind, SummaryStyle,
};

struct RecordedCall {
    messages: Vec<ChatMessage>,
    temperature: f32,
}

/// Plays back a fixed list of replies and records every call it receives.
/// Once the script runs out, further calls fail like an upstream outage.
struct ScriptedGateway {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedGateway {
    fn with_replies(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn recorded_calls(&self) -> Vec<RecordedCall> {
        std::mem::take(&mut self.calls.lock().unwrap())
    }
}

#[async_trait]
impl ChatCompletionService for ScriptedGateway {
    async fn complete(&self, messages: &[ChatMessage], temperature: f32) -> CoreResult<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: messages.to_vec(),
            temperature,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| CoreError::UpstreamGeneration("scripted replies exhausted".to_string()))
    }
}

fn user_content(call: &RecordedCall) -> &str {
    &call
        .messages
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::User)
        .expect("call has a user message")
        .content
}

#[tokio::test]
async fn short_notes_are_summarized_in_a_single_call() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();

    let gateway = ScriptedGateway::with_replies(&["A tidy summary."]);
    let notes = "The mitochondria is the powerhouse of the cell.";
    let summary = summarizer::summarize_notes(&gateway, notes, SummaryStyle::Structured)
        .await
        .unwrap();

    assert_eq!(summary, "A tidy summary.");
    let calls = gateway.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert!((calls[0].temperature - 0.4).abs() < f32::EPSILON);
    let prompt = user_content(&calls[0]);
    assert!(prompt.contains("a structured summary with headings"));
    assert!(prompt.contains(notes));
}

#[tokio::test]
async fn long_notes_run_through_map_reduce() {
    let notes: String = (0..2600).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
    let gateway = ScriptedGateway::with_replies(&["s1", "s2", "final"]);

    let summary = summarizer::summarize_notes(&gateway, &notes, SummaryStyle::Concise)
        .await
        .unwrap();
    assert_eq!(summary, "final");

    let calls = gateway.recorded_calls();
    assert_eq!(calls.len(), 3);

    // 2600 words with a 2500-word window and 150-word overlap: two chunks,
    // the second starting at word 2350.
    let first = user_content(&calls[0]);
    assert!(first.contains("(part 1 of 2)"));
    assert!(first.ends_with("w2499"));
    assert!(!first.contains("w2500 "));
    assert!((calls[0].temperature - 0.3).abs() < f32::EPSILON);

    let second = user_content(&calls[1]);
    assert!(second.contains("(part 2 of 2)"));
    assert!(second.contains("\nw2350 "));
    assert!(second.ends_with("w2599"));
    assert!((calls[1].temperature - 0.3).abs() < f32::EPSILON);

    let merge = user_content(&calls[2]);
    assert!(merge.contains("Section 1 Summary:\ns1"));
    assert!(merge.contains("Section 2 Summary:\ns2"));
    assert!(merge.contains("\n\n---\n\n"));
    assert!((calls[2].temperature - 0.4).abs() < f32::EPSILON);
}

#[tokio::test]
async fn map_reduce_aborts_on_the_first_failed_chunk() {
    let notes: String = (0..2600).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
    // Only one scripted reply: the second chunk call hits the outage.
    let gateway = ScriptedGateway::with_replies(&["s1"]);

    let err = summarizer::summarize_notes(&gateway, &notes, SummaryStyle::Detailed)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::UpstreamGeneration(_)));
    // No merge call after the failure.
    assert_eq!(gateway.recorded_calls().len(), 2);
}

#[tokio::test]
async fn empty_notes_never_reach_the_model() {
    let gateway = ScriptedGateway::with_replies(&[]);
    let err = summarizer::summarize_notes(&gateway, "   \n\t ", SummaryStyle::Structured)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::EmptyInput("Notes")));
    assert!(gateway.recorded_calls().is_empty());
}

#[tokio::test]
async fn quiz_flow_parses_fenced_json_and_scores_answers() {
    let reply = r#"```json
[
  {
    "question": "Which organelle produces ATP?",
    "options": ["Nucleus", "Mitochondria", "Ribosome", "Golgi body"],
    "answer": "Mitochondria",
    "explanation": "Mitochondria run cellular respiration."
  },
  {
    "question": "Which organelle stores DNA?",
    "options": ["Nucleus", "Mitochondria", "Ribosome", "Golgi body"],
    "answer": "Nucleus",
    "explanation": "The nucleus holds the genome."
  }
]
```"#;
    let gateway = ScriptedGateway::with_replies(&[reply]);

    let questions = quiz::generate_quiz(&gateway, "cell biology", 2, QuizKind::MultipleChoice)
        .await
        .unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].answer, "Mitochondria");
    assert_eq!(questions[1].options.as_ref().unwrap().len(), 4);

    let calls = gateway.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert!((calls[0].temperature - 0.6).abs() < f32::EPSILON);
    assert!(user_content(&calls[0]).contains("Generate exactly 2 MCQ questions"));

    // One right, one unanswered.
    let answers = HashMap::from([(0, "Mitochondria".to_string())]);
    let report = score_quiz(&questions, &answers);
    assert_eq!(report.score, 1);
    assert_eq!(report.total, 2);
    assert!((report.percentage - 50.0).abs() < f64::EPSILON);
    assert!(report.results[0].correct);
    assert!(!report.results[1].correct);
    assert_eq!(report.results[1].your_answer, "");
}

#[tokio::test]
async fn quiz_surfaces_the_raw_reply_when_no_json_is_found() {
    let prose = "Sure! Here are some great questions for you to study with.";
    let gateway = ScriptedGateway::with_replies(&[prose]);

    let err = quiz::generate_quiz(&gateway, "cell biology", 5, QuizKind::TrueFalse)
        .await
        .unwrap_err();
    match err {
        CoreError::UnparsableResponse(raw) => assert!(raw.contains(prose)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn flashcards_default_missing_categories_and_clamp_the_count() {
    let reply = r#"[
  {"front": "What is ATP?", "back": "The cell's energy currency", "category": "Biology"},
  {"front": "What is ADP?", "back": "ATP minus one phosphate"},
  {"front": "What is NADH?", "back": "An electron carrier", "category": "Biology"},
  {"front": "What is glycolysis?", "back": "Glucose breakdown to pyruvate", "category": "Biology"},
  {"front": "What is the Krebs cycle?", "back": "The citric acid cycle", "category": "Biology"}
]"#;
    let gateway = ScriptedGateway::with_replies(&[reply]);

    let cards = flashcards::generate_flashcards(&gateway, "cell energetics", 100)
        .await
        .unwrap();
    assert_eq!(cards.len(), 5);
    assert!(cards.iter().all(|c| !c.front.is_empty() && !c.back.is_empty()));
    assert_eq!(cards[0].category, "Biology");
    assert_eq!(cards[1].category, "General");

    let calls = gateway.recorded_calls();
    assert!(user_content(&calls[0]).contains("Create exactly 30 flashcards"));
}

#[tokio::test]
async fn explainer_targets_the_requested_audience() {
    let gateway = ScriptedGateway::with_replies(&["Gravity pulls things together."]);

    let explanation = explainer::explain_concept(&gateway, "gravity", DifficultyLevel::Eli5, "")
        .await
        .unwrap();
    assert_eq!(explanation, "Gravity pulls things together.");

    let calls = gateway.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert!((calls[0].temperature - 0.7).abs() < f32::EPSILON);
    let prompt = user_content(&calls[0]);
    assert!(prompt.contains("ELI5 - use very simple words"));
    assert!(prompt.contains("gravity"));
}

#[tokio::test]
async fn tutor_injects_truncated_study_context_and_keeps_history() {
    let gateway = ScriptedGateway::with_replies(&["Of course!"]);
    let history = vec![
        ChatMessage::user("What is osmosis?"),
        ChatMessage::assistant("Movement of water across a membrane."),
    ];
    let long_context = "x".repeat(4000);

    let reply = chat::tutor_reply(&gateway, &history, "Can you give an example?", &long_context)
        .await
        .unwrap();
    assert_eq!(reply, "Of course!");

    let calls = gateway.recorded_calls();
    let messages = &calls[0].messages;
    // System prompt, two history turns, the new user message.
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].role, ChatRole::System);
    // Exactly the first 3000 characters of the study context are injected.
    assert!(messages[0].content.ends_with(&"x".repeat(3000)));
    assert!(!messages[0].content.ends_with(&"x".repeat(3001)));
    assert_eq!(messages[1].content, "What is osmosis?");
    assert_eq!(messages[3].content, "Can you give an example?");
    assert!((calls[0].temperature - 0.7).abs() < f32::EPSILON);
}

#[tokio::test]
async fn tutor_skips_context_injection_for_blank_material() {
    let gateway = ScriptedGateway::with_replies(&["Hello!"]);
    chat::tutor_reply(&gateway, &[], "Hi", "   \n ").await.unwrap();

    let calls = gateway.recorded_calls();
    assert!(!calls[0].messages[0]
        .content
        .contains("study material for context"));
}
