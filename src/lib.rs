// 公开导出的模块，供外部使用
pub mod models;
pub mod data_provider;
pub mod errors;

// 主程序依赖的内部模块，库使用场景下不作为公开接口
#[doc(hidden)]
pub mod scrapers;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod services;
#[doc(hidden)]
pub mod util;

// 重新导出常用类型，方便使用
pub use models::csv::CsvDocument;
pub use models::quote::{DailyQuote, QueryDate, QuoteHistory, QuoteRequest};
pub use data_provider::QuoteDataProvider;
pub use errors::{Result, QuoteHubError};
