use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "logs-cli")]
#[command(about = "Client for the ERROR log API", long_about = None)]
struct Cli {
    /// Base URL of a running server.
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Log resource path.
    #[arg(short, long, default_value = "/api/logs")]
    route: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream ERROR entries and print them as they arrive
    Errors {
        /// Pretty-print each record
        #[arg(long)]
        pretty: bool,
    },
    /// Post a JSON payload
    Submit {
        /// Inline JSON document
        #[arg(conflicts_with = "file", required_unless_present = "file")]
        json: Option<String>,

        /// Read the payload from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let endpoint = format!("{}{}", cli.url.trim_end_matches('/'), cli.route);

    match cli.command {
        Commands::Errors { pretty } => {
            let mut res = client.get(&endpoint).send().await?;
            let status = res.status();
            if !status.is_success() {
                eprintln!("Error: server returned status {}", status);
                eprintln!("Response: {}", res.text().await.unwrap_or_default());
                return Ok(());
            }

            let mut pending = Vec::new();
            while let Some(chunk) = res.chunk().await? {
                pending.extend_from_slice(&chunk);
                while let Some(pos) = pending.iter().position(|b| *b == b'\n') {
                    let line: Vec<u8> = pending.drain(..=pos).collect();
                    print_record(&line[..pos], pretty)?;
                }
            }
            if !pending.is_empty() {
                print_record(&pending, pretty)?;
            }
        }
        Commands::Submit { json, file } => {
            let payload = match (json, file) {
                (Some(json), _) => json,
                (None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None) => return Err("provide a JSON payload or --file".into()),
            };

            let res = client
                .post(&endpoint)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(payload)
                .send()
                .await?;
            let status = res.status();
            let text = res.text().await?;
            if status.is_success() {
                println!("{} {}", status, text);
            } else {
                eprintln!("Error: server returned status {}", status);
                eprintln!("Response: {}", text);
            }
        }
    }

    Ok(())
}

fn print_record(line: &[u8], pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    if pretty {
        let value: Value = serde_json::from_slice(line)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", String::from_utf8_lossy(line));
    }
    Ok(())
}
