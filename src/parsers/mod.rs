pub mod html;
pub mod payload;


use crate::error::ScrapeError;

/// Main parser that runs a fetched page through the HTML and payload stages
pub struct Parser;

impl Parser {
    /// Extract photo URLs from a raw listing page.
    ///
    /// `anchor_id` is the `id` of the script element holding the page data.
    pub fn photo_urls(body: &[u8], anchor_id: &str) -> Result<Vec<String>, ScrapeError> {
        let text = html::find_data_anchor(body, anchor_id)?;
        let payload = payload::parse(&text)?;
        payload::extract_photo_urls(&payload)
    }
}
