pub mod http;


use crate::error::ScrapeError;
use std::future::Future;

/// Source of listing page bodies.
///
/// The pipeline only ever asks for one page per run; implementations must
/// not carry state (cookies, sessions) from one call to the next.
pub trait PageFetcher {
    /// Fetch the raw body of `url`, failing on transport errors and
    /// non-success statuses
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ScrapeError>>;
}
