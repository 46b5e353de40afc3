use quotehub::config::Config;
use quotehub::data_provider::QuoteDataProvider;
use quotehub::models::quote::{QueryDate, QuoteRequest};
use quotehub::scrapers::base::QuoteScraper;
use quotehub::scrapers::yahoo::YahooScraper;
use quotehub::services::data_service::DataService;
use quotehub::util;

use chrono::{Datelike, NaiveDate};
use clap::{App, Arg, SubCommand};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init();

    // 创建基本的命令行应用
    let app = App::new("QuoteHub")
        .version("1.0.0")
        .author("QuoteHub Team")
        .about("Historical stock quote download system");

    // 在开发模式下添加调试参数
    #[cfg(debug_assertions)]
    let app = app
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("Enable debug mode")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("debug-limit")
                .long("debug-limit")
                .help("Limit the number of quotes to process in debug mode")
                .takes_value(true)
                .default_value("2"),
        );

    // 添加子命令
    let app = app
        .subcommand(
            SubCommand::with_name("fetch")
                .about("Fetch historical quote data and persist per-symbol CSV files")
                .arg(
                    Arg::with_name("jobs")
                        .short('j')
                        .long("jobs")
                        .value_name("FILE")
                        .help("JSON file listing the quote requests to fetch")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("symbol")
                        .short('s')
                        .long("symbol")
                        .value_name("SYMBOL")
                        .help("Single symbol to fetch instead of the job list")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("begin")
                        .short('b')
                        .long("begin")
                        .value_name("DATE")
                        .help("Begin date for --symbol (YYYY-MM-DD)")
                        .takes_value(true)
                        .default_value("2010-01-01"),
                )
                .arg(
                    Arg::with_name("end")
                        .short('e')
                        .long("end")
                        .value_name("DATE")
                        .help("End date for --symbol (YYYY-MM-DD)")
                        .takes_value(true)
                        .default_value("2017-03-10"),
                )
                .arg(
                    Arg::with_name("data-dir")
                        .long("data-dir")
                        .value_name("DIR")
                        .help("Output directory for CSV files (must already exist)")
                        .takes_value(true)
                        .default_value("data"),
                )
                .arg(
                    Arg::with_name("continue-on-error")
                        .short('c')
                        .long("continue-on-error")
                        .help("Keep fetching remaining symbols when one fails")
                        .takes_value(false),
                ),
        )
        .subcommand(
            SubCommand::with_name("explore")
                .about("Explore persisted quote data")
                .arg(
                    Arg::with_name("symbol")
                        .short('s')
                        .long("symbol")
                        .value_name("SYMBOL")
                        .help("Symbol to explore")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("data-dir")
                        .long("data-dir")
                        .value_name("DIR")
                        .help("Directory holding the persisted CSV files")
                        .takes_value(true)
                        .default_value("data"),
                )
                .arg(
                    Arg::with_name("limit")
                        .short('l')
                        .long("limit")
                        .value_name("LIMIT")
                        .help("Limit the number of records to display")
                        .takes_value(true)
                        .default_value("10"),
                ),
        );

    let matches = app.get_matches();

    // 获取调试模式设置
    #[cfg(debug_assertions)]
    let debug_mode = matches.is_present("debug");
    #[cfg(not(debug_assertions))]
    let debug_mode = false;

    #[cfg(debug_assertions)]
    let debug_quote_limit = matches
        .value_of("debug-limit")
        .unwrap_or("2")
        .parse::<usize>()
        .unwrap_or(2);
    #[cfg(not(debug_assertions))]
    let debug_quote_limit = usize::MAX;

    if let Some(matches) = matches.subcommand_matches("fetch") {
        let data_dir = matches.value_of("data-dir").unwrap();
        let continue_on_error = matches.is_present("continue-on-error");

        // 组装抓取任务列表
        let mut requests = if let Some(symbol) = matches.value_of("symbol") {
            let begin = parse_query_date(matches.value_of("begin").unwrap())?;
            let end = parse_query_date(matches.value_of("end").unwrap())?;
            vec![QuoteRequest {
                symbol: symbol.to_string(),
                begin,
                end,
            }]
        } else if let Some(jobs) = matches.value_of("jobs") {
            util::read_requests(Path::new(jobs))?
        } else {
            util::default_requests()
        };

        // 调试模式：只处理前N个任务
        if debug_mode && requests.len() > debug_quote_limit {
            let original_count = requests.len();
            requests.truncate(debug_quote_limit);
            info!(
                "DEBUG MODE: Processing only {} out of {} quotes",
                requests.len(),
                original_count
            );
        }

        // 创建配置
        let config = Config::new()
            .with_debug_mode(debug_mode)
            .with_debug_quote_limit(debug_quote_limit)
            .with_data_dir(data_dir)
            .with_continue_on_error(continue_on_error);

        // 创建抓取器和数据服务
        let scraper: Arc<dyn QuoteScraper + Send + Sync> = Arc::new(YahooScraper::new()?);
        let data_service = DataService::new(config, scraper);

        info!("Fetching {} quotes into {}", requests.len(), data_dir);
        data_service.process_all(&requests).await?;
    } else if let Some(matches) = matches.subcommand_matches("explore") {
        let symbol_filter = matches.value_of("symbol");
        let data_dir = matches.value_of("data-dir").unwrap();
        let limit = matches
            .value_of("limit")
            .unwrap_or("10")
            .parse::<usize>()
            .unwrap_or(10);

        // 读取数据
        let provider = QuoteDataProvider::load_from_dir(data_dir)?;

        info!(
            "Found {} quote histories in {}",
            provider.get_all_histories().len(),
            data_dir
        );

        // 过滤数据
        let histories: Vec<_> = provider
            .get_all_histories()
            .iter()
            .filter(|history| {
                symbol_filter.map_or(true, |symbol| history.symbol.contains(symbol))
            })
            .collect();

        info!("Filtered to {} histories", histories.len());

        // 显示结果
        for history in &histories {
            info!(
                "Quote: {} - {} daily records",
                history.symbol,
                history.daily.len()
            );
            info!("{:-<70}", "");
            info!(
                "{:<12} {:<10} {:<10} {:<10} {:<10} {:<12} {:<10}",
                "Date", "Open", "High", "Low", "Close", "Volume", "Adj Close"
            );
            info!("{:-<70}", "");

            // 数据按时间正序保存，倒序遍历以显示最近的记录
            for quote in history.daily.iter().rev().take(limit) {
                let date_str = quote.date.format("%Y-%m-%d").to_string();
                info!(
                    "{:<12} {:<10.2} {:<10.2} {:<10.2} {:<10.2} {:<12} {:<10.2}",
                    date_str,
                    quote.open,
                    quote.high,
                    quote.low,
                    quote.close,
                    quote.volume,
                    quote.adj_close
                );
            }

            if history.daily.len() > limit {
                info!("... and {} more records", history.daily.len() - limit);
            } else if history.daily.is_empty() {
                warn!("No daily data available for this quote");
            }
        }
    } else {
        info!("No command specified. Use --help for usage information.");
    }

    Ok(())
}

// 将 YYYY-MM-DD 格式的日期转换为接口查询日期，月份从0开始
fn parse_query_date(text: &str) -> anyhow::Result<QueryDate> {
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")?;
    Ok(QueryDate {
        year: date.year(),
        month: date.month0(),
        day: date.day(),
    })
}
