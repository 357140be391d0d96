pub mod chunk;
pub mod domain;
pub mod parse;
pub mod ports;
pub mod score;

pub use chunk::{chunk_words, ChunkConfig, INGEST_CHUNKING, SUMMARIZER_CHUNKING};
pub use domain::{AnswerReview, ChatMessage, ChatRole, DifficultyLevel, Flashcard, QuizKind,
    QuizQuestion, ScoreReport, SummaryStyle};
pub use parse::parse_json_array;
pub use ports::{ChatCompletionService, CoreError, CoreResult};
pub use score::score_quiz;
