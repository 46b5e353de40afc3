use thiserror::Error;
use std::num::{ParseFloatError, ParseIntError};

#[derive(Error, Debug)]
pub enum QuoteHubError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    EncodingError(#[from] std::str::Utf8Error),

    #[error("Date parsing error: {0}")]
    DateError(#[from] chrono::ParseError),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Parse int error: {0}")]
    ParseIntError(#[from] ParseIntError),

    #[error("Parse float error: {0}")]
    ParseFloatError(#[from] ParseFloatError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, QuoteHubError>;

// 用于从字符串创建错误
impl From<String> for QuoteHubError {
    fn from(s: String) -> Self {
        QuoteHubError::Unknown(s)
    }
}

// 用于从&str创建错误
impl From<&str> for QuoteHubError {
    fn from(s: &str) -> Self {
        QuoteHubError::Unknown(s.to_string())
    }
}
