use chrono::NaiveDate;
use log::{info, warn};

use crate::errors::{Result, QuoteHubError};
use crate::models::csv::CsvDocument;
use crate::models::quote::{DailyQuote, QuoteHistory};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// 行情数据提供者，用于访问已保存的历史数据
#[derive(Debug)]
pub struct QuoteDataProvider {
    data: Vec<QuoteHistory>,
    // 索引用于快速查找
    symbol_index: HashMap<String, usize>,
}

impl QuoteDataProvider {
    /// 使用提供的数据创建新的数据提供者实例
    pub fn new_with_data(data: Vec<QuoteHistory>) -> Self {
        let mut provider = Self {
            data,
            symbol_index: HashMap::new(),
        };

        provider.rebuild_indices();
        provider
    }

    /// 从单个CSV文件加载历史数据，文件名（不含扩展名）即代码
    pub fn load_file(path: &Path) -> Result<QuoteHistory> {
        let symbol = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| {
                QuoteHubError::DataError(format!("invalid data file name: {}", path.display()))
            })?
            .to_string();

        let text = fs::read_to_string(path)?;
        let document = CsvDocument::parse(&text)?;

        let mut daily = Vec::with_capacity(document.rows.len());
        for row in &document.rows {
            match DailyQuote::parse_line(row) {
                Ok(quote) => daily.push(quote),
                Err(e) => warn!("Skipping malformed row in {}: {}", path.display(), e),
            }
        }

        Ok(QuoteHistory { symbol, daily })
    }

    /// 从数据目录加载全部历史数据
    pub fn load_from_dir(dir: &str) -> Result<Self> {
        let mut data = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
                continue;
            }

            match Self::load_file(&path) {
                Ok(history) => data.push(history),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        // 按代码排序，保证加载顺序稳定
        data.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        info!("Loaded {} quote histories from {}", data.len(), dir);

        Ok(Self::new_with_data(data))
    }

    /// 获取所有历史数据
    pub fn get_all_histories(&self) -> &[QuoteHistory] {
        &self.data
    }

    /// 获取指定代码的历史数据
    pub fn get_history_by_symbol(&self, symbol: &str) -> Option<&QuoteHistory> {
        self.symbol_index.get(symbol).map(|&idx| &self.data[idx])
    }

    /// 获取最新交易日期
    pub fn get_latest_trading_date(&self) -> Option<NaiveDate> {
        // 数据按时间正序保存，每个代码的末行即最新记录
        self.data
            .iter()
            .filter_map(|history| history.daily.last())
            .map(|quote| quote.date)
            .max()
    }

    /// 重建索引
    fn rebuild_indices(&mut self) {
        self.symbol_index.clear();

        for (i, history) in self.data.iter().enumerate() {
            self.symbol_index.insert(history.symbol.clone(), i);
        }
    }
}
