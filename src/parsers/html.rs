use crate::error::ScrapeError;
use scraper::{Html, Selector};

/// Locates the script element carrying `anchor_id` and returns its text.
///
/// The body is decoded lossily so a stray invalid byte elsewhere in the page
/// does not hide the anchor.
pub fn find_data_anchor(body: &[u8], anchor_id: &str) -> Result<String, ScrapeError> {
    let html = String::from_utf8_lossy(body);
    let doc = Html::parse_document(&html);

    let script_selector = Selector::parse("script").unwrap();
    let anchor = doc
        .select(&script_selector)
        .find(|e| e.value().id() == Some(anchor_id));

    match anchor {
        Some(element) => {
            let text = element.text().collect::<String>();
            ::log::debug!("Found #{} with {} bytes of text", anchor_id, text.len());
            Ok(text)
        }
        None => {
            ::log::warn!("No <script id=\"{}\"> in page", anchor_id);
            Err(ScrapeError::MissingDataAnchor)
        }
    }
}
