pub struct Config {
    pub debug_mode: bool,
    pub debug_quote_limit: usize,
    pub data_dir: String,
    pub continue_on_error: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            debug_mode: false,
            debug_quote_limit: 10,
            data_dir: "data".to_string(),
            // 默认与原始行为一致：任一任务失败即终止整个运行
            continue_on_error: false,
        }
    }

    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    pub fn with_debug_quote_limit(mut self, limit: usize) -> Self {
        self.debug_quote_limit = limit;
        self
    }

    pub fn with_data_dir(mut self, dir: &str) -> Self {
        self.data_dir = dir.to_string();
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = Config::new()
            .with_data_dir("quotes")
            .with_continue_on_error(true);

        assert_eq!(config.data_dir, "quotes");
        assert!(config.continue_on_error);
        assert!(!config.debug_mode);
        assert_eq!(config.debug_quote_limit, 10);
    }
}
