pub mod http_fetcher;

pub use http_fetcher::HttpFetcher;

use async_trait::async_trait;

use crate::app::Result;

/// Transport seam for the poll loop: fetch the raw snapshot bytes.
///
/// A non-2xx status or a connection/timeout failure is an error; the caller
/// treats either as a fatal end to the poll loop.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
