use std::time::Instant;

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "diag-cli")]
#[command(about = "Probe CLI for the diagnostic server", long_about = None)]
struct Cli {
    #[arg(short, long, env = "DIAG_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project information and proxy headers
    Root,
    /// Health check
    Health,
    /// Host and process information
    Info,
    /// Ask the server to answer with a specific status code
    Status {
        code: String,
    },
    /// Generate synthetic load
    Load {
        /// Non-blocking delay in milliseconds
        #[arg(long, default_value_t = 0)]
        delay: u64,
        /// Blocking CPU time in milliseconds
        #[arg(long, default_value_t = 0)]
        cpu: u64,
    },
}

impl Commands {
    fn path(&self) -> String {
        match self {
            Commands::Root => "/".to_string(),
            Commands::Health => "/health".to_string(),
            Commands::Info => "/info".to_string(),
            Commands::Status { code } => format!("/status/{code}"),
            Commands::Load { delay, cpu } => format!("/load?delay={delay}&cpu={cpu}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.command.path());
    let start = Instant::now();
    let res = client.get(&url).send().await?;
    let elapsed = start.elapsed();

    print_response(res).await?;
    if let Commands::Load { .. } = cli.command {
        println!("Elapsed: {:?}", elapsed);
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    println!("Status: {}", status);

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
