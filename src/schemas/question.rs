use serde::Serialize;

use crate::db::models::Question;

/// Public view of a question; the row id stays internal.
#[derive(Debug, Serialize)]
pub(crate) struct QuestionResponse {
    pub(crate) question: String,
    pub(crate) answer: String,
    pub(crate) topic: String,
    pub(crate) difficulty: i32,
}

impl From<Question> for QuestionResponse {
    fn from(row: Question) -> Self {
        Self {
            question: row.question,
            answer: row.answer,
            topic: row.topic,
            difficulty: row.difficulty,
        }
    }
}
