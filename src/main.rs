#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = assessment_engine::run().await {
        eprintln!("assessment-engine fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
