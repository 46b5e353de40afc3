use crate::errors::{Result, QuoteHubError};

/// CSV文档，首行为表头，数据行保持解析时的顺序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    pub header: String,
    pub rows: Vec<String>,
}

impl CsvDocument {
    /// 解析响应文本，首行视为表头，前后空白不参与解析
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(QuoteHubError::DataError("empty response body".to_string()));
        }

        let mut lines = trimmed.lines();
        let header = match lines.next() {
            Some(line) => line.to_string(),
            None => return Err(QuoteHubError::DataError("empty response body".to_string())),
        };
        let rows = lines.map(|line| line.to_string()).collect();

        Ok(Self { header, rows })
    }

    /// 反转数据行顺序，表头位置保持不变
    pub fn reverse_rows(&mut self) {
        self.rows.reverse();
    }

    /// 输出为CSV文本，表头在前，行之间以换行符连接
    pub fn to_csv_string(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.header.as_str());
        lines.extend(self.rows.iter().map(|row| row.as_str()));
        lines.join("\n")
    }
}
