//! Murder in Chicago battle client binary.
//!
//! Reads configuration from the environment (and `.env`), sets up logging,
//! then plays one battle in the terminal.
//!
//! # Examples
//!
//! ```bash
//! # Play the default encounter
//! cargo run -p chicago-client
//!
//! # Watch the scripted policy play both sides, with a transcript
//! CHICAGO_AUTO=1 CHICAGO_SEED=1929 CHICAGO_TRANSCRIPT=battle.jsonl cargo run -p chicago-client
//! ```

use anyhow::Result;
use chicago_client::{CliConfig, Client, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = CliConfig::from_env();

    // 2. Setup logging (the guard flushes the log file on exit)
    let _log_guard = logging::setup_logging(config.log_stderr)?;

    tracing::info!("Starting Chicago client");
    tracing::info!("Auto mode: {}", config.auto);

    // 3. Build and run
    let client = Client::new(config)?;
    client.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
