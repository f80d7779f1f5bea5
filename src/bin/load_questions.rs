#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = math_practice::run_loader().await {
        eprintln!("load_questions fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
