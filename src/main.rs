#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = math_practice::run().await {
        eprintln!("math-practice fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
