use std::path::PathBuf;

use sqlx::Row;

const TEST_DATABASE_URL_VAR: &str = "MATH_PRACTICE_TEST_DATABASE_URL";

fn database_url() -> anyhow::Result<String> {
    dotenvy::dotenv().ok();
    match std::env::var(TEST_DATABASE_URL_VAR) {
        Ok(url) if !url.trim().is_empty() => Ok(url),
        _ => anyhow::bail!("{TEST_DATABASE_URL_VAR} is not set"),
    }
}

fn write_data_dir() -> std::io::Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("math-practice-smoke-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir)?;

    let algebra = [
        r#"{"problem": "P", "solution": "S \\boxed{S}", "type": "Algebra", "level": "Level 3"}"#,
        "",
        r#"{"problem": "It's 2?", "solution": "\\boxed{2}", "type": "Algebra", "level": "Level 1"}"#,
    ];
    std::fs::write(dir.join("algebra.jsonl"), algebra.join("\n"))?;

    let geometry = [
        r#"{"problem": "G", "solution": "\\boxed{G}", "type": "Geometry", "level": "Level ?"}"#,
        r#"{"problem": "H", "solution": "\\boxed{H}", "type": "Geometry"}"#,
        r#"{"problem": "I", "solution": "\\boxed{I}", "type": "Geometry", "level": "Level 5"}"#,
    ];
    std::fs::write(dir.join("geometry.jsonl"), geometry.join("\n"))?;

    Ok(dir)
}

#[tokio::test]
#[ignore = "needs MATH_PRACTICE_TEST_DATABASE_URL"]
async fn loader_populates_questions_table() -> anyhow::Result<()> {
    let database_url = database_url()?;

    let data_dir = write_data_dir()?;
    std::env::set_var("DATABASE_URL", &database_url);
    std::env::set_var("LOADER_DATA_DIR", &data_dir);

    let outcome = math_practice::run_loader().await;
    let _ = std::fs::remove_dir_all(&data_dir);
    outcome?;

    let pool =
        sqlx::postgres::PgPoolOptions::new().max_connections(1).connect(&database_url).await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions").fetch_one(&pool).await?;
    assert_eq!(total, 3, "two malformed geometry records should be skipped");

    let row = sqlx::query(
        "SELECT question, answer, difficulty FROM questions \
         WHERE topic = $1 AND difficulty = $2",
    )
    .bind("Algebra")
    .bind(3_i32)
    .fetch_one(&pool)
    .await?;
    let question: String = row.try_get("question")?;
    let answer: String = row.try_get("answer")?;
    assert_eq!(question, "P");
    assert!(answer.contains('S'));

    let out_of_range = sqlx::query(
        "INSERT INTO questions (question, answer, topic, difficulty) VALUES ($1, $2, $3, $4)",
    )
    .bind("x")
    .bind("y")
    .bind("Algebra")
    .bind(6_i32)
    .execute(&pool)
    .await;
    assert!(out_of_range.is_err(), "difficulty check constraint must reject 6");

    Ok(())
}
