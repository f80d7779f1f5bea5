use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::db::models::{NewQuestion, Question};
use crate::db::types::{Difficulty, Topic};

pub(crate) const COLUMNS: &str = "id, question, answer, topic, difficulty";

// PostgreSQL caps a statement at 65535 bind parameters; four per row.
const INSERT_CHUNK_ROWS: usize = 10_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct QuestionFilter {
    pub(crate) topic: Option<Topic>,
    pub(crate) difficulty: Option<Difficulty>,
}

pub(crate) async fn find_random(
    pool: &PgPool,
    filter: QuestionFilter,
) -> Result<Option<Question>, sqlx::Error> {
    let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM questions"));
    let mut separator = " WHERE ";

    if let Some(topic) = filter.topic {
        builder.push(separator);
        builder.push("topic = ");
        builder.push_bind(topic.label());
        separator = " AND ";
    }
    if let Some(difficulty) = filter.difficulty {
        builder.push(separator);
        builder.push("difficulty = ");
        builder.push_bind(difficulty.get());
    }

    builder.push(" ORDER BY random() LIMIT 1");

    builder.build_query_as::<Question>().fetch_optional(pool).await
}

/// Creates the table when absent and empties it otherwise.
pub(crate) async fn reset_table(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS questions (
            id SERIAL PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            topic TEXT NOT NULL,
            difficulty INT NOT NULL CHECK (difficulty BETWEEN 1 AND 5)
         )",
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query("TRUNCATE TABLE questions RESTART IDENTITY").execute(&mut *conn).await?;
    Ok(())
}

pub(crate) async fn insert_many(
    conn: &mut PgConnection,
    rows: &[NewQuestion],
) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;

    for chunk in rows.chunks(INSERT_CHUNK_ROWS) {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO questions (question, answer, topic, difficulty) ",
        );
        builder.push_values(chunk, |mut row, question| {
            row.push_bind(&question.question)
                .push_bind(&question.answer)
                .push_bind(&question.topic)
                .push_bind(question.difficulty);
        });

        inserted += builder.build().execute(&mut *conn).await?.rows_affected();
    }

    Ok(inserted)
}

pub(crate) async fn count(executor: impl sqlx::PgExecutor<'_>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM questions").fetch_one(executor).await
}
