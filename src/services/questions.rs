use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::models::Question;
use crate::repositories;
use crate::repositories::questions::QuestionFilter;

/// Read side of the question bank as seen by request handlers.
#[async_trait]
pub(crate) trait QuestionStore: Send + Sync {
    async fn random_question(&self, filter: QuestionFilter)
        -> Result<Option<Question>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub(crate) struct PgQuestionStore {
    pool: PgPool,
}

impl PgQuestionStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn random_question(
        &self,
        filter: QuestionFilter,
    ) -> Result<Option<Question>, sqlx::Error> {
        repositories::questions::find_random(&self.pool, filter).await
    }
}
