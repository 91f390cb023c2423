use anyhow::Result;
use clap::Parser;
use yt_comments::{init_tracing_once, ChannelQuery, CommentScraper, HttpApi, Prompter, ScrapeOptions, API_KEY_ENV};

/// Download every comment on a YouTube channel and save JSON, CSV and HTML reports.
///
/// Runs interactively; the API key is read from the YOUTUBE_API_KEY environment variable.
#[derive(Debug, Parser)]
#[command(name = "yt-comments", version)]
struct Cli {}

fn main() -> Result<()> {
    let _ = Cli::parse();
    init_tracing_once();

    println!("\nYouTube Comments Scraper");

    let opts = ScrapeOptions::from_env();
    if opts.api_key.is_none() {
        eprintln!("\nError: no API key. Set {API_KEY_ENV} to your YouTube Data API v3 key.");
        return Ok(());
    }
    let api = HttpApi::from_options(&opts)?;
    let scraper = CommentScraper::new(api).options(opts);

    let mut prompt = Prompter::stdio();
    prompt.say("How do you want to identify the channel?\n")?;
    prompt.say("1. Channel name")?;
    prompt.say("2. Channel URL")?;
    prompt.say("3. Channel id")?;

    let query = match prompt.ask("Choice")?.as_str() {
        "1" => ChannelQuery::Handle(prompt.ask("Enter channel name")?),
        "2" => ChannelQuery::Url(prompt.ask("Enter channel URL")?),
        "3" => ChannelQuery::Id(prompt.ask("Enter channel id")?),
        _ => {
            println!("Invalid choice!");
            return Ok(());
        }
    };

    let Some(channel_id) = scraper.resolve_channel(&query) else {
        println!("\nUnable to find channel. Verify the entered data.");
        return Ok(());
    };
    println!("\nChannel id found: {channel_id}");

    if !prompt.confirm("Proceed with comments download? [y/N]")? {
        println!("Operation cancelled.");
        return Ok(());
    }
    println!("Download started");

    let outcome = scraper.scrape_channel(&channel_id);
    if outcome.comments.is_empty() {
        println!("\nNo comments found");
        return Ok(());
    }

    match scraper.save_reports(&outcome) {
        Ok(Some(saved)) => {
            println!("\nJSON: {}", saved.json.display());
            println!("CSV:  {}", saved.csv.display());
            if let Some(html) = saved.html {
                println!("HTML: {}", html.display());
            }
        }
        Ok(None) => {}
        Err(e) => tracing::error!("Error saving reports: {e:#}"),
    }

    Ok(())
}
