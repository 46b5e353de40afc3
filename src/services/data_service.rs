use crate::config::Config;
use crate::errors::{Result, QuoteHubError};
use crate::models::csv::CsvDocument;
use crate::models::quote::QuoteRequest;
use crate::scrapers::base::QuoteScraper;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;

/// 数据服务，处理行情的抓取、整理和存储
pub struct DataService {
    config: Config,
    scraper: Arc<dyn QuoteScraper + Send + Sync>,
    data_dir: PathBuf,
}

impl DataService {
    /// 创建新的数据服务实例
    pub fn new(config: Config, scraper: Arc<dyn QuoteScraper + Send + Sync>) -> Self {
        let data_dir = PathBuf::from(&config.data_dir);
        Self {
            config,
            scraper,
            data_dir,
        }
    }

    /// 获取指定代码的输出文件路径
    pub fn output_path(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", symbol))
    }

    /// 抓取单个代码的历史数据，按时间正序写入文件，返回原始响应
    pub async fn process_quote(&self, request: &QuoteRequest) -> Result<Vec<u8>> {
        info!(
            "Processing quote: {} from {}",
            request.symbol,
            self.scraper.source_code()
        );

        let raw = self.scraper.fetch_history(request).await?;
        let text = std::str::from_utf8(&raw)?;
        debug!("{}", text);

        // 接口返回的数据行按时间倒序排列，反转后表头保持在首行
        let mut document = CsvDocument::parse(text)?;
        document.reverse_rows();

        // data目录需要预先存在，缺失时写入失败并返回IO错误
        let path = self.output_path(&request.symbol);
        std::fs::write(&path, document.to_csv_string())?;

        info!("Saved {} rows to {}", document.rows.len(), path.display());
        Ok(raw)
    }

    /// 按顺序处理全部抓取任务
    pub async fn process_all(&self, requests: &[QuoteRequest]) -> Result<()> {
        let mut failed = Vec::new();

        for request in requests {
            if self.config.continue_on_error {
                if let Err(e) = self.process_quote(request).await {
                    warn!("Failed to process {}: {}", request.symbol, e);
                    failed.push(request.symbol.clone());
                }
            } else {
                self.process_quote(request).await?;
            }
        }

        if !failed.is_empty() {
            return Err(QuoteHubError::DataError(format!(
                "{} of {} quotes failed: {}",
                failed.len(),
                requests.len(),
                failed.join(", ")
            )));
        }

        info!("Successfully processed {} quotes", requests.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct FixedScraper {
        body: Vec<u8>,
    }

    #[async_trait]
    impl QuoteScraper for FixedScraper {
        fn source_code(&self) -> &'static str {
            "FIXED"
        }

        async fn fetch_history(&self, request: &QuoteRequest) -> Result<Vec<u8>> {
            if request.symbol == "BAD" {
                return Err(QuoteHubError::DataError("no data for BAD".to_string()));
            }
            Ok(self.body.clone())
        }
    }

    fn service_in(dir: &TempDir, body: &str, continue_on_error: bool) -> DataService {
        let config = Config::new()
            .with_data_dir(dir.path().to_str().unwrap())
            .with_continue_on_error(continue_on_error);
        let scraper = Arc::new(FixedScraper {
            body: body.as_bytes().to_vec(),
        });
        DataService::new(config, scraper)
    }

    fn spy_request() -> QuoteRequest {
        QuoteRequest::new("SPY", (2010, 0, 1), (2017, 2, 10))
    }

    #[tokio::test]
    async fn writes_rows_oldest_first_and_returns_original_bytes() {
        let dir = TempDir::new().unwrap();
        let body = "Date,Close\n2017-01-03,100\n2017-01-04,101\n2017-01-05,102";
        let service = service_in(&dir, body, false);

        let raw = service.process_quote(&spy_request()).await.unwrap();
        assert_eq!(raw, body.as_bytes());

        let written = std::fs::read_to_string(dir.path().join("SPY.csv")).unwrap();
        assert_eq!(
            written,
            "Date,Close\n2017-01-05,102\n2017-01-04,101\n2017-01-03,100"
        );
    }

    #[tokio::test]
    async fn second_run_overwrites_with_identical_content() {
        let dir = TempDir::new().unwrap();
        let body = "Date,Close\n2017-01-04,101\n2017-01-03,100";
        let service = service_in(&dir, body, false);

        service.process_quote(&spy_request()).await.unwrap();
        let first = std::fs::read(dir.path().join("SPY.csv")).unwrap();

        service.process_quote(&spy_request()).await.unwrap();
        let second = std::fs::read(dir.path().join("SPY.csv")).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn header_only_body_writes_just_the_header() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir, "Date,Open,High,Low,Close,Volume,Adj Close\n", false);

        service.process_quote(&spy_request()).await.unwrap();

        let written = std::fs::read_to_string(dir.path().join("SPY.csv")).unwrap();
        assert_eq!(written, "Date,Open,High,Low,Close,Volume,Adj Close");
    }

    #[tokio::test]
    async fn empty_body_is_a_data_error() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir, "", false);

        let err = service.process_quote(&spy_request()).await.unwrap_err();
        assert!(matches!(err, QuoteHubError::DataError(_)));
        assert!(!dir.path().join("SPY.csv").exists());
    }

    #[tokio::test]
    async fn missing_data_dir_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let config = Config::new().with_data_dir(missing.to_str().unwrap());
        let service = DataService::new(
            config,
            Arc::new(FixedScraper {
                body: b"Date,Close\n2017-01-03,100".to_vec(),
            }),
        );

        let err = service.process_quote(&spy_request()).await.unwrap_err();
        assert!(matches!(err, QuoteHubError::IoError(_)));
    }

    #[tokio::test]
    async fn fail_fast_aborts_remaining_quotes() {
        let dir = TempDir::new().unwrap();
        let body = "Date,Close\n2017-01-03,100";
        let service = service_in(&dir, body, false);

        let requests = vec![
            QuoteRequest::new("SPY", (2010, 0, 1), (2017, 2, 10)),
            QuoteRequest::new("BAD", (2007, 0, 1), (2017, 2, 10)),
            QuoteRequest::new("GLD", (2005, 0, 1), (2017, 2, 10)),
        ];

        let err = service.process_all(&requests).await.unwrap_err();
        assert!(matches!(err, QuoteHubError::DataError(_)));

        assert!(dir.path().join("SPY.csv").exists());
        assert!(!dir.path().join("GLD.csv").exists());
    }

    #[tokio::test]
    async fn continue_on_error_processes_remaining_and_summarizes() {
        let dir = TempDir::new().unwrap();
        let body = "Date,Close\n2017-01-03,100";
        let service = service_in(&dir, body, true);

        let requests = vec![
            QuoteRequest::new("SPY", (2010, 0, 1), (2017, 2, 10)),
            QuoteRequest::new("BAD", (2007, 0, 1), (2017, 2, 10)),
            QuoteRequest::new("GLD", (2005, 0, 1), (2017, 2, 10)),
        ];

        let err = service.process_all(&requests).await.unwrap_err();
        match err {
            QuoteHubError::DataError(message) => {
                assert!(message.contains("1 of 3"));
                assert!(message.contains("BAD"));
            }
            other => panic!("unexpected error: {}", other),
        }

        assert!(dir.path().join("SPY.csv").exists());
        assert!(dir.path().join("GLD.csv").exists());
    }
}
