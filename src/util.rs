use std::fs;
use std::path::Path;

use crate::errors::Result;
use crate::models::quote::QuoteRequest;

/// 内置的默认抓取任务列表
pub fn default_requests() -> Vec<QuoteRequest> {
    vec![
        QuoteRequest::new("SPY", (2010, 0, 1), (2017, 2, 10)),
        QuoteRequest::new("SLV", (2007, 0, 1), (2017, 2, 10)),
        QuoteRequest::new("GLD", (2005, 0, 1), (2017, 2, 10)),
        QuoteRequest::new("CAT", (2004, 0, 1), (2017, 2, 10)),
        QuoteRequest::new("IBM", (2005, 0, 1), (2017, 2, 10)),
    ]
}

/// 从JSON文件读取抓取任务列表
pub fn read_requests(path: &Path) -> Result<Vec<QuoteRequest>> {
    let text = fs::read_to_string(path)?;
    let requests = serde_json::from_str(&text)?;
    Ok(requests)
}
