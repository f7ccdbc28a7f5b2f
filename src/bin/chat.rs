//! Terminal chat client for a running Inquister server.
//!
//! Commands: `:clear`, `:export [path]`, `:quit`.

use anyhow::Result;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use inquister::client::{ChatClient, ChatSession, Command, Step, TerminalBell};
use inquister::config::Config;
use inquister::transcript::FileTranscriptStore;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let config = Config::load();
    // Leave the server room to hit its own upstream timeout first
    let client = ChatClient::new(
        config.client.endpoint.clone(),
        config.gemini.timeout() + Duration::from_secs(5),
    )?;
    let store = FileTranscriptStore::new(config.client.transcript_path.clone());
    let mut session = ChatSession::open(
        client,
        Box::new(store),
        Box::new(TerminalBell),
        &config.assistant.name,
    )?;

    for entry in session.transcript().entries() {
        println!("{}\n", entry.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        match session.run(Command::parse(&line), &config.client.export_path).await {
            Step::Quit => break,
            Step::Print(text) => println!("{text}"),
            Step::Warn(text) => eprintln!("{text}"),
            Step::Idle => {}
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()
}
