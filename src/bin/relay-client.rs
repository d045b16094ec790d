use std::io;

use gemini_relay::{
    client::{run_session, RelayClient},
    init_tracing,
};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing("warn");

    let client = RelayClient::from_env();
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    run_session(&client, stdin, &mut stdout).await
}
