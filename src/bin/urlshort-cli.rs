use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use urlshort::routing::{decode_json, decode_yaml, PathRecord};

#[derive(Parser)]
#[command(name = "urlshort-cli")]
#[command(about = "Management CLI for the urlshort admin API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[arg(short, long, env = "URLSHORT_ADMIN_KEY", default_value = "CHANGE_ME_IN_PRODUCTION")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version, live layers and store size
    Status,
    /// List every path in the persistent store
    List,
    /// Add or overwrite one path
    Add { path: String, url: String },
    /// Bulk add paths from a .json or .yaml/.yml record list
    Import { file: PathBuf },
    /// Rebuild the redirect chain from current sources
    Reload,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let request = match cli.command {
        Commands::Status => client.get(format!("{}/admin/status", cli.url)),
        Commands::List => client.get(format!("{}/admin/paths", cli.url)),
        Commands::Add { path, url } => client
            .post(format!("{}/admin/paths", cli.url))
            .json(&PathRecord::new(path, url)),
        Commands::Import { file } => {
            let records = read_records(&file)?;
            println!("Importing {} records from {}", records.len(), file.display());
            client
                .post(format!("{}/admin/paths/bulk", cli.url))
                .json(&records)
        }
        Commands::Reload => client.post(format!("{}/admin/reload", cli.url)),
    };

    let res = request.headers(headers).send().await?;
    print_response(res).await
}

fn read_records(file: &Path) -> Result<Vec<PathRecord>, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(file)?;
    let records = match file.extension().and_then(|e| e.to_str()) {
        Some("json") => decode_json(&bytes)?,
        Some("yaml") | Some("yml") => decode_yaml(&bytes)?,
        _ => return Err(format!("unsupported file type: {}", file.display()).into()),
    };
    Ok(records)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
