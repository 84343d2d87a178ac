mod layers;

use crate::layers::{Config, PaperDetails};
use crate::layers::discovery::SemanticScholarClient;
use crate::layers::document::update_section;
use crate::layers::publish::GitPublisher;
use crate::layers::render::render_entry;
use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

const DEFAULT_QUERY: &str = "Inference-Time Scaling";

#[derive(Parser)]
#[command(name = "paper-tracker", about = "Fetch paper metadata and append it to the README paper list")]
struct Cli {
    /// Topic or title to search for
    #[arg(default_value = DEFAULT_QUERY)]
    paper_name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 0. Load Configuration
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config {
        api_key: env::var("SEMANTIC_SCHOLAR_API_KEY").ok(),
        ..Config::default()
    };
    if let Ok(path) = env::var("PAPERS_FILE") {
        config.papers_file = PathBuf::from(path);
    }

    // 1. Search
    println!("--- Step 1: Search ---");
    let client = SemanticScholarClient::new(&config);
    let records = match client.search(&cli.paper_name, config.search_limit).await {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Search failed: {}", e);
            Vec::new()
        }
    };
    println!("Found {} papers for \"{}\".", records.len(), cli.paper_name);

    if records.is_empty() {
        println!("Nothing to add; {} left untouched.", config.papers_file.display());
        return Ok(());
    }

    for record in &records {
        println!(
            "  📖 {} ({})",
            record.title,
            record.year.map_or_else(|| "year unknown".to_string(), |y| y.to_string())
        );
    }

    // 2. Extended lookup + formatting
    println!("\n--- Step 2: Format ---");
    let mut entries = Vec::new();
    for record in &records {
        let details = match &record.paper_id {
            Some(id) => match client.fetch_details(id).await {
                Ok(details) => details,
                Err(e) => {
                    tracing::warn!("Extended lookup failed for {}: {}", id, e);
                    PaperDetails::default()
                }
            },
            None => PaperDetails::default(),
        };
        entries.push(render_entry(record, &details));
    }

    // 3. Merge into the document
    println!("\n--- Step 3: Update Document ---");
    let content = match tokio::fs::read_to_string(&config.papers_file).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    let updated = update_section(&content, &config.section_title, entries);
    tokio::fs::write(&config.papers_file, updated).await?;
    println!("Merged {} new entries into {}.", records.len(), config.papers_file.display());

    // 4. Publish
    println!("\n--- Step 4: Publish ---");
    let publisher = GitPublisher::new(&config);
    match publisher.publish().await {
        Ok(()) => println!("Changes committed and pushed."),
        Err(e) => tracing::warn!("Publishing failed, keeping the local change: {}", e),
    }

    Ok(())
}
