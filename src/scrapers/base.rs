use crate::errors::Result;
use crate::models::quote::QuoteRequest;
use async_trait::async_trait;

/// Base trait for historical quote scrapers
#[async_trait]
pub trait QuoteScraper {
    /// Get the data source code this scraper is for
    fn source_code(&self) -> &'static str;

    /// Fetch historical CSV data for a request
    /// Returns the raw, undecoded response body
    async fn fetch_history(&self, request: &QuoteRequest) -> Result<Vec<u8>>;
}
