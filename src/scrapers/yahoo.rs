use crate::errors::Result;
use crate::models::quote::QuoteRequest;
use crate::scrapers::base::QuoteScraper;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;

/// 默认的历史行情接口地址
const DEFAULT_BASE_URL: &str = "http://ichart.finance.yahoo.com";

/// Yahoo历史行情数据抓取器
pub struct YahooScraper {
    client: Client,
    base_url: String,
}

impl YahooScraper {
    /// 创建新的Yahoo行情抓取器
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// 使用指定接口地址创建抓取器，便于切换镜像站点
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    // 构造查询路径。参数顺序与接口约定一致：先结束日期后起始日期，
    // 月份从0开始，代码原样写入，不做转义
    fn build_query(&self, request: &QuoteRequest) -> String {
        format!(
            "/table.csv?s={}&d={}&e={}&f={}&g=d&a={}&b={}&c={}&ignore=.csv",
            request.symbol,
            request.end.month,
            request.end.day,
            request.end.year,
            request.begin.month,
            request.begin.day,
            request.begin.year,
        )
    }
}

#[async_trait]
impl QuoteScraper for YahooScraper {
    fn source_code(&self) -> &'static str {
        "YAHOO"
    }

    async fn fetch_history(&self, request: &QuoteRequest) -> Result<Vec<u8>> {
        let query = self.build_query(request);
        info!("uri= {}", query);

        let response = self
            .client
            .get(format!("{}{}", self.base_url, query))
            .send()
            .await?;

        let bytes = response.bytes().await?;
        debug!("获取到 {} 字节响应", bytes.len());

        Ok(bytes.to_vec())
    }
}
