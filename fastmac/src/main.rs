use fastmac::{Config, init_logging, serve};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    init_logging(&config)?;
    serve(config).await
}
