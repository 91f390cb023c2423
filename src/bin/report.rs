use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use yt_comments::{ensure_html_extension, init_tracing_once, render_html_report, Prompter};

/// Render a saved comments JSON file as a searchable, self-contained HTML report.
#[derive(Debug, Parser)]
#[command(name = "yt-report", version)]
struct Cli {
    /// JSON comments file written by yt-comments (prompted for when omitted)
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing_once();

    println!("{}", "=".repeat(60));
    println!("YouTube Comments HTML Report Generator");
    println!("{}", "=".repeat(60));

    let mut prompt = Prompter::stdio();
    let json = match cli.json {
        Some(path) => path,
        None => PathBuf::from(prompt.ask("Enter path to JSON file with comments")?),
    };

    if json.as_os_str().is_empty() {
        tracing::error!("You must specify a JSON file");
        return Ok(());
    }
    if !json.exists() {
        tracing::error!("File not found: {}", json.display());
        return Ok(());
    }

    let custom = prompt.ask("HTML output filename (press Enter for default)")?;
    let output = if custom.is_empty() { None } else { Some(ensure_html_extension(&custom)) };

    // failures are logged by the renderer
    let _ = render_html_report(&json, output.as_deref());
    Ok(())
}
