use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub(crate) struct Question {
    pub(crate) id: i32,
    pub(crate) question: String,
    pub(crate) answer: String,
    pub(crate) topic: String,
    pub(crate) difficulty: i32,
}

/// A question about to be inserted; `id` is assigned by the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewQuestion {
    pub(crate) question: String,
    pub(crate) answer: String,
    pub(crate) topic: String,
    pub(crate) difficulty: i32,
}
