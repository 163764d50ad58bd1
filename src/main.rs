use clap::Parser;
use std::io;
use zillow_photos::PhotoScraper;

mod args;
use args::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    // Initialize logging (stderr, quiet unless RUST_LOG is set)
    env_logger::init();

    let args = Args::parse();
    let url = args.resolve_url(io::stdin().lock(), io::stdout())?;

    ::log::info!("Scraping photos for: {}", url);

    let scraper = PhotoScraper::new();
    let outcome = scraper.run(&url).await;

    if outcome.is_error() {
        ::log::debug!("Scrape finished with an error: {:?}", outcome);
    }

    // Errors are reported as data; the exit status stays successful
    outcome.write_to(io::stdout().lock())
}
