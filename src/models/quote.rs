use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, QuoteHubError};

/// 查询日期，月份从0开始（0 = 一月），与行情接口的参数约定一致
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QueryDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Quote request describing one download job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub symbol: String,
    pub begin: QueryDate,
    pub end: QueryDate,
}

impl QuoteRequest {
    /// 创建新的抓取任务，日期为 (年, 月, 日)，月份从0开始
    pub fn new(symbol: &str, begin: (i32, u32, u32), end: (i32, u32, u32)) -> Self {
        Self {
            symbol: symbol.to_string(),
            begin: QueryDate {
                year: begin.0,
                month: begin.1,
                day: begin.2,
            },
            end: QueryDate {
                year: end.0,
                month: end.1,
                day: end.2,
            },
        }
    }
}

/// 日线数据结构
#[derive(Debug, Clone, Serialize)]
pub struct DailyQuote {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    pub adj_close: f64,
}

impl DailyQuote {
    /// 解析一行CSV数据，列顺序为 Date,Open,High,Low,Close,Volume,Adj Close
    pub fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').map(|field| field.trim()).collect();
        if fields.len() < 7 {
            return Err(QuoteHubError::DataError(format!(
                "expected 7 columns, got {}: {}",
                fields.len(),
                line
            )));
        }

        Ok(Self {
            date: NaiveDate::parse_from_str(fields[0], "%Y-%m-%d")?,
            open: fields[1].parse()?,
            high: fields[2].parse()?,
            low: fields[3].parse()?,
            close: fields[4].parse()?,
            volume: fields[5].parse()?,
            adj_close: fields[6].parse()?,
        })
    }
}

/// Quote history with nested daily data
#[derive(Debug, Clone, Serialize)]
pub struct QuoteHistory {
    pub symbol: String,
    pub daily: Vec<DailyQuote>,
}
