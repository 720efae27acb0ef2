use anyhow::Result;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("cobot_cell=info"))
        .init();

    let dir = std::env::args().nth(1).unwrap_or_else(|| "schemas".to_string());
    cobot_cell::config_schema::generate_schema(&dir)?;
    Ok(())
}
