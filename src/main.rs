use clap::Parser;
use debate_relay::{serve, Config, Result};

#[derive(Parser)]
#[command(name = "debate-relay")]
#[command(about = "HTTP relay for LLM-backed debate generation and judging")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Pick up OPENAI_API_KEY and friends from a local .env if present.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    serve(config, cli.port).await
}
